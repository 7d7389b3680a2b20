pub mod bounds;
pub mod engine;
pub mod types;

pub use bounds::{bounds_for, DistanceBounds};
pub use engine::validate;
pub use types::{
    Severity, ValidationError, ValidationResult, ValidationStatistics, ValidationWarning,
};
