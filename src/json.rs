// JSON array file operations

use crate::error::{Result, StoreError};
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Read a JSON array document into a vector
///
/// A missing file yields an empty vector. So does a file whose content is
/// not a JSON array of `T` (bad syntax, truncated text, wrong shape or
/// invalid UTF-8); that case is logged and the content is discarded on the
/// next write. Any other read failure is returned as
/// [`StoreError::Storage`].
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(file = ?path, "File not found, starting with an empty list");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Storage {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_slice::<Vec<T>>(&bytes) {
        Ok(records) => {
            debug!(file = ?path, count = records.len(), "Loaded records from JSON");
            Ok(records)
        }
        Err(e) => {
            warn!(
                file = ?path,
                error = %e,
                "Failed to parse JSON, starting with an empty list"
            );
            Ok(Vec::new())
        }
    }
}

/// Overwrite a file with the pretty-printed JSON array of `records`
///
/// Parent directories are created as needed.
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let storage_err = |source| StoreError::Storage {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(storage_err)?;
    }

    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');

    let mut file = fs::File::create(path).map_err(storage_err)?;
    file.write_all(json.as_bytes()).map_err(storage_err)?;
    file.sync_all().map_err(storage_err)?; // Ensure data is flushed to disk

    debug!(file = ?path, count = records.len(), "Wrote records to JSON");
    Ok(())
}
