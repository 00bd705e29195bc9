//! Where wildcard candidates come from.
//!
//! A download or delete expands its pattern against the bucket; an upload
//! expands against the local filesystem. Both sides answer the same
//! prefix-listing question, so the matcher does not care which one it talks
//! to.

use std::path::Path;

use nordata_glob::SEPARATOR;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{TransferError, TransferResult};

/// Anything that can list keys under a `/`-separated prefix.
pub trait KeySource {
    /// List every key starting with `prefix`, in a stable order.
    ///
    /// Directory placeholders (keys ending in `/`) may be included; the
    /// matcher discards them.
    fn list_keys(&self, prefix: &str) -> TransferResult<Vec<String>>;
}

/// The local filesystem as a key source.
///
/// Lists one directory level, like a shell glob whose wildcard sits in the
/// final component. Subdirectories come back as placeholders so they never
/// match.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFiles;

impl KeySource for LocalFiles {
    fn list_keys(&self, prefix: &str) -> TransferResult<Vec<String>> {
        let dir_part = match prefix.rfind(SEPARATOR) {
            Some(idx) => &prefix[..=idx],
            None => "",
        };
        let dir = if dir_part.is_empty() {
            Path::new(".")
        } else {
            Path::new(dir_part)
        };
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "local directory missing, nothing to expand");
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut keys = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| TransferError::LocalListing {
                path: dir.display().to_string(),
                cause: e.into(),
            })?;
            let name = entry.file_name().to_string_lossy();
            let mut key = format!("{dir_part}{name}");
            if entry.path().is_dir() {
                key.push(SEPARATOR);
            }
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
