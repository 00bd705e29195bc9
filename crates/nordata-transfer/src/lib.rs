//! Batch transfers between a local filesystem and an object store.
//!
//! Every batch call goes through the same two steps:
//!
//! 1. **Reconcile** -- validate the source/destination arguments and turn
//!    them into an ordered list of [`TransferPair`]s, expanding a single
//!    wildcard path when present (see [`reconcile`]).
//! 2. **Run** -- hand each pair to the store one at a time, in order. The
//!    first failure stops the batch; pairs already transferred stay
//!    transferred.
//!
//! The [`Bucket`] handle ties a store to its [`TransferConfig`] and exposes
//! `download`, `upload`, `delete` and `glob`.
//!
//! [`TransferConfig`]: nordata_store::TransferConfig

pub mod bucket;
pub mod error;
pub mod path_spec;
pub mod reconcile;
pub mod source;

pub use bucket::{Bucket, MAX_DELETE_BATCH};
pub use error::{TransferError, TransferResult};
pub use path_spec::PathSpec;
pub use reconcile::{
    reconcile, reconcile_delete, reconcile_delete_value, reconcile_values, validate,
    validate_delete, Expansion, TransferPair,
};
pub use source::{KeySource, LocalFiles};
