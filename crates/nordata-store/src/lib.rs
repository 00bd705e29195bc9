//! Object-store backends for nordata.
//!
//! A store is one flat namespace (a bucket). Keys look like paths but the
//! store has no directories; a key ending in `/` is a directory placeholder.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`LocalObjectStore`] -- a bucket rooted at a local directory
//!
//! Remote vendor clients implement the same trait outside this workspace.

pub mod config;
pub mod error;
pub mod local;
pub mod memory;
pub mod traits;

pub use config::TransferConfig;
pub use error::{StoreError, StoreResult};
pub use local::LocalObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
