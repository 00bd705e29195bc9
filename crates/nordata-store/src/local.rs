//! A bucket rooted at a local directory.
//!
//! Keys map to paths relative to the root. Empty directories are reported as
//! directory placeholders (`name/`), the way object-store consoles create
//! "folders". Deleting the last key under a directory removes the
//! directory too.
//!
//! ```text
//! <root>/
//!   ├─ tmp/
//!   │   ├─ a.csv        -> "tmp/a.csv"
//!   │   └─ empty/       -> "tmp/empty/"
//!   └─ img.png          -> "img.png"
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use nordata_glob::{is_placeholder, SEPARATOR};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TransferConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// Object store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    name: String,
    root: PathBuf,
}

impl LocalObjectStore {
    /// Open an existing directory as a bucket.
    ///
    /// Fails with [`StoreError::NamespaceNotFound`] if `root` is not a
    /// directory.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StoreError::NamespaceNotFound(root.display().to_string()));
        }
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Ok(Self { name, root })
    }

    /// Create the directory if needed, then open it.
    pub fn create(root: impl AsRef<Path>) -> StoreResult<Self> {
        fs::create_dir_all(root.as_ref())?;
        Self::open(root)
    }

    /// The bucket's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to a path under the root, rejecting keys that would escape.
    fn resolve(&self, key: &str) -> StoreResult<PathBuf> {
        let invalid = |reason: &str| StoreError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        if key.is_empty() {
            return Err(invalid("key must not be empty"));
        }
        let relative = Path::new(key);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                Component::CurDir | Component::ParentDir => {
                    return Err(invalid("key must not contain '.' or '..' segments"))
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("key must be relative"))
                }
            }
        }
        Ok(self.root.join(relative))
    }

    /// Remove the file or empty directory behind `key`.
    ///
    /// Returns `Ok(false)` when there was no such object. A placeholder whose
    /// directory still has children is not an object of its own.
    fn remove_key(&self, key: &str, path: &Path) -> io::Result<bool> {
        let result = if is_placeholder(key) {
            let has_children = fs::read_dir(path)
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(false);
            if has_children {
                return Ok(false);
            }
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        }
        if let Some(parent) = path.parent() {
            self.prune_empty_dirs(parent);
        }
        Ok(true)
    }

    /// Remove directories left empty by a delete, walking up to the root.
    /// A directory only exists while some key lives under it.
    fn prune_empty_dirs(&self, start: &Path) {
        let mut dir = start;
        while dir != self.root && dir.starts_with(&self.root) {
            // Fails on the first directory that still has children.
            if fs::remove_dir(dir).is_err() {
                break;
            }
            debug!(bucket = %self.name, dir = %dir.display(), "pruned empty directory");
            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
    }

    /// Render a path under the root as a `/`-separated key.
    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.join(&SEPARATOR.to_string()))
    }
}

impl ObjectStore for LocalObjectStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn head_bucket(&self) -> StoreResult<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(StoreError::NamespaceNotFound(self.name.clone()))
        }
    }

    fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        // Only walk the deepest directory the prefix pins down.
        let start = match prefix.rfind(SEPARATOR) {
            Some(idx) if idx > 0 => self.resolve(&prefix[..idx])?,
            _ => self.root.clone(),
        };
        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&start).min_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            let Some(key) = self.key_for(entry.path()) else {
                continue;
            };
            let key = if entry.file_type().is_dir() {
                let is_empty = fs::read_dir(entry.path())?.next().is_none();
                if !is_empty {
                    continue;
                }
                format!("{key}{SEPARATOR}")
            } else {
                key
            };
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        keys.sort();
        debug!(bucket = %self.name, prefix, count = keys.len(), "listed local keys");
        Ok(keys)
    }

    fn get_object(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::ObjectNotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn put_object(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        let path = self.resolve(key)?;
        if is_placeholder(key) {
            fs::create_dir_all(&path)?;
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        Ok(())
    }

    fn delete_objects(&self, keys: &[String]) -> StoreResult<Vec<String>> {
        let paths = keys
            .iter()
            .map(|key| self.resolve(key))
            .collect::<StoreResult<Vec<_>>>()?;

        let mut deleted = Vec::with_capacity(keys.len());
        for (key, path) in keys.iter().zip(&paths) {
            match self.remove_key(key, path) {
                Ok(true) => deleted.push(key.clone()),
                Ok(false) => {}
                Err(e) => warn!(bucket = %self.name, key = %key, error = %e, "delete failed"),
            }
        }
        Ok(deleted)
    }

    fn download_file(
        &self,
        key: &str,
        local_path: &Path,
        config: &TransferConfig,
    ) -> StoreResult<u64> {
        let source = self.resolve(key)?;
        let input = match File::open(&source) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::ObjectNotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(parent) = local_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        copy_chunked(input, File::create(local_path)?, config)
    }

    fn upload_file(
        &self,
        local_path: &Path,
        key: &str,
        config: &TransferConfig,
    ) -> StoreResult<u64> {
        let target = self.resolve(key)?;
        let input = File::open(local_path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        copy_chunked(input, File::create(&target)?, config)
    }
}

/// Stream `input` into `output`, buffering by the configured chunk size for
/// large files.
fn copy_chunked(input: File, output: File, config: &TransferConfig) -> StoreResult<u64> {
    let size = input.metadata()?.len();
    let written = if config.is_multipart(size) {
        let capacity = config.chunk_len();
        let mut reader = BufReader::with_capacity(capacity, input);
        let mut writer = BufWriter::with_capacity(capacity, output);
        let n = io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        n
    } else {
        let mut reader = input;
        let mut writer = output;
        io::copy(&mut reader, &mut writer)?
    };
    Ok(written)
}
