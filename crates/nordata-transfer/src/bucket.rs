use std::path::Path;
use std::sync::Arc;

use nordata_glob::KeyPattern;
use nordata_store::{ObjectStore, TransferConfig};
use tracing::{debug, info, warn};

use crate::error::{TransferError, TransferResult};
use crate::path_spec::PathSpec;
use crate::reconcile::{reconcile, reconcile_delete, Expansion, TransferPair};
use crate::source::{KeySource, LocalFiles};

/// Most keys a single batch delete request may carry.
pub const MAX_DELETE_BATCH: usize = 1000;

/// An opened bucket: the store handle plus the transfer tuning every
/// operation uses.
///
/// Callers build one explicitly and pass it around; nothing here reads
/// ambient session state.
#[derive(Clone)]
pub struct Bucket {
    store: Arc<dyn ObjectStore>,
    config: TransferConfig,
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.store.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Bucket {
    /// Validate `config` and probe the store.
    ///
    /// Fails with [`TransferError::NamespaceNotFound`] if the bucket does not
    /// exist and [`TransferError::AuthenticationExpiredOrInvalid`] if the
    /// credentials are refused.
    pub fn open(store: Arc<dyn ObjectStore>, config: TransferConfig) -> TransferResult<Self> {
        config
            .validate()
            .map_err(|e| TransferError::InvalidConfig(e.to_string()))?;
        store
            .head_bucket()
            .map_err(|e| TransferError::from_store(store.name(), e))?;
        debug!(bucket = store.name(), "opened bucket");
        Ok(Self { store, config })
    }

    pub fn name(&self) -> &str {
        self.store.name()
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Keys matching a single-wildcard pattern, in listing order.
    pub fn glob(&self, pattern: &str) -> TransferResult<Vec<String>> {
        let pattern = KeyPattern::parse(pattern)?;
        let candidates = self.list_keys(pattern.listing_prefix())?;
        Ok(pattern.filter(candidates))
    }

    /// Download objects to local files.
    ///
    /// A single source key may hold one wildcard; every match is written into
    /// the `destination` directory under its file name. Pairs are processed
    /// in order and the first failure stops the batch without undoing the
    /// files already written. Returns the pairs transferred.
    ///
    /// Nested matches that share a file name (`tmp/a/x.csv`, `tmp/b/x.csv`)
    /// map to the same local path, and the later one in listing order wins.
    pub fn download(
        &self,
        source: &PathSpec,
        destination: &PathSpec,
    ) -> TransferResult<Vec<TransferPair>> {
        let pairs = reconcile(source, destination, Expansion::Glob(self))?;
        if pairs.is_empty() {
            debug!(bucket = self.name(), "nothing to download");
        }
        for pair in &pairs {
            let bytes = self
                .store
                .download_file(&pair.source, Path::new(&pair.destination), &self.config)
                .map_err(|e| TransferError::from_store(&pair.source, e))?;
            info!(key = %pair.source, path = %pair.destination, bytes, "download complete");
        }
        Ok(pairs)
    }

    /// Upload local files.
    ///
    /// A single local path may hold one wildcard, expanded one directory level
    /// deep; subdirectories are skipped. Every match lands under the
    /// `destination` key prefix with its file name.
    pub fn upload(
        &self,
        source: &PathSpec,
        destination: &PathSpec,
    ) -> TransferResult<Vec<TransferPair>> {
        let pairs = reconcile(source, destination, Expansion::Glob(&LocalFiles))?;
        if pairs.is_empty() {
            warn!(bucket = self.name(), "no local files matched, nothing uploaded");
        }
        for pair in &pairs {
            let bytes = self
                .store
                .upload_file(Path::new(&pair.source), &pair.destination, &self.config)
                .map_err(|e| TransferError::from_store(&pair.destination, e))?;
            info!(path = %pair.source, key = %pair.destination, bytes, "upload complete");
        }
        Ok(pairs)
    }

    /// Delete keys and return the ones the store reports deleted.
    ///
    /// A single key may hold one wildcard. An expansion with no matches is a
    /// successful no-op that sends no delete request.
    pub fn delete(&self, keys: &PathSpec) -> TransferResult<Vec<String>> {
        let keys = reconcile_delete(keys, Expansion::Glob(self))?;
        if keys.is_empty() {
            debug!(bucket = self.name(), "nothing to delete");
            return Ok(Vec::new());
        }

        let mut deleted = Vec::with_capacity(keys.len());
        for batch in keys.chunks(MAX_DELETE_BATCH) {
            let done = self
                .store
                .delete_objects(batch)
                .map_err(|e| TransferError::from_store(&batch[0], e))?;
            if done.len() < batch.len() {
                warn!(
                    bucket = self.name(),
                    requested = batch.len(),
                    deleted = done.len(),
                    "some keys were not deleted"
                );
            }
            deleted.extend(done);
        }
        info!(bucket = self.name(), count = deleted.len(), "delete complete");
        Ok(deleted)
    }
}

impl KeySource for Bucket {
    fn list_keys(&self, prefix: &str) -> TransferResult<Vec<String>> {
        debug!(bucket = self.name(), prefix, "listing keys");
        self.store
            .list_keys(prefix)
            .map_err(|e| TransferError::from_store(prefix, e))
    }
}
