pub mod settings;

pub use settings::{AppConfig, MatcherSettings, ReconcileSettings, ValidationSettings};
