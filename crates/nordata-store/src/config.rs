use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Default multipart threshold and chunk size: 8 MiB.
pub const DEFAULT_MULTIPART_BYTES: u64 = 8 * 1024 * 1024;

/// Tuning passed to every file transfer.
///
/// Files at or above `multipart_threshold` are moved in pieces of
/// `multipart_chunksize` bytes; how a backend uses the pieces is its own
/// business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Minimum file size that triggers a chunked transfer.
    pub multipart_threshold: u64,
    /// Chunk size for chunked transfers.
    pub multipart_chunksize: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            multipart_threshold: DEFAULT_MULTIPART_BYTES,
            multipart_chunksize: DEFAULT_MULTIPART_BYTES,
        }
    }
}

impl TransferConfig {
    /// Reject zero thresholds and chunk sizes.
    pub fn validate(&self) -> StoreResult<()> {
        if self.multipart_threshold == 0 {
            return Err(StoreError::InvalidConfig(
                "multipart_threshold must be greater than zero".into(),
            ));
        }
        if self.multipart_chunksize == 0 {
            return Err(StoreError::InvalidConfig(
                "multipart_chunksize must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Whether a payload of `size` bytes should be chunked.
    pub fn is_multipart(&self, size: u64) -> bool {
        size >= self.multipart_threshold
    }

    /// Chunk size as a buffer length.
    pub fn chunk_len(&self) -> usize {
        usize::try_from(self.multipart_chunksize).unwrap_or(usize::MAX)
    }
}
