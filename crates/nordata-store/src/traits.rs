use std::fs;
use std::path::Path;

use crate::config::TransferConfig;
use crate::error::StoreResult;

/// One flat object namespace (a bucket).
///
/// All implementations must satisfy these invariants:
/// - Keys are opaque `/`-separated strings; there are no real directories.
/// - `list_keys` returns keys in lexicographic order.
/// - Every call is synchronous from the caller's point of view. Backends that
///   parallelize chunked transfers internally must finish before returning.
/// - I/O errors are propagated. The one exception is `delete_objects`, which
///   reports per-key failures by leaving the key out of its result.
pub trait ObjectStore: Send + Sync {
    /// Name of the namespace, for messages.
    fn name(&self) -> &str;

    /// Probe the namespace.
    ///
    /// Returns `Err(StoreError::NamespaceNotFound)` if it does not exist and
    /// `Err(StoreError::AuthenticationExpiredOrInvalid)` if access is refused.
    fn head_bucket(&self) -> StoreResult<()>;

    /// List all keys that start with `prefix`.
    ///
    /// Pass `""` to list the whole namespace.
    fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Read one object.
    fn get_object(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Create or replace one object.
    fn put_object(&self, key: &str, data: &[u8]) -> StoreResult<()>;

    /// Delete a batch of keys and return the ones actually deleted.
    ///
    /// Missing keys and keys that fail individually are left out of the
    /// result. An error means the batch as a whole was refused.
    fn delete_objects(&self, keys: &[String]) -> StoreResult<Vec<String>>;

    /// Copy an object to a local file and return the bytes written.
    ///
    /// Default implementation reads the whole object with `get_object()`.
    /// Missing parent directories of `local_path` are created.
    fn download_file(
        &self,
        key: &str,
        local_path: &Path,
        _config: &TransferConfig,
    ) -> StoreResult<u64> {
        let data = self.get_object(key)?;
        if let Some(parent) = local_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(local_path, &data)?;
        Ok(data.len() as u64)
    }

    /// Copy a local file into the store and return the bytes read.
    ///
    /// Default implementation reads the whole file and calls `put_object()`.
    fn upload_file(
        &self,
        local_path: &Path,
        key: &str,
        _config: &TransferConfig,
    ) -> StoreResult<u64> {
        let data = fs::read(local_path)?;
        self.put_object(key, &data)?;
        Ok(data.len() as u64)
    }
}
