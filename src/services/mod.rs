pub mod matching;
pub mod reconciliation;
pub mod validation;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::InputError;

/// Load a JSON array of records (results or roster entries) from disk.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a serializable engine output as pretty JSON.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    std::fs::write(path, raw)?;
    Ok(())
}
