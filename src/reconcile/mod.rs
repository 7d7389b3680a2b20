pub mod matcher;
pub mod merge;
pub mod orchestrator;
pub mod report;
pub mod types;

pub use matcher::match_records;
pub use merge::{merge_checkpoints, merge_records};
pub use orchestrator::reconcile;
pub use report::render_report;
pub use types::{
    FieldConflict, MatchMethod, MatchResult, ReconciliationResult, ReconciliationStatistics,
    Resolution,
};
