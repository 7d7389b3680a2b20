use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading result-set or roster files for the CLI. The
/// engines themselves are total and never fail.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid result JSON document: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
