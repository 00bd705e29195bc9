//! Configuration for nordata.
//!
//! Everything the wrappers need to know up front lives in one
//! [`NordataConfig`], loaded from TOML and adjusted from the environment.
//! Nothing is looked up implicitly later: callers build their store and
//! bucket handles from this value.

pub mod config;
pub mod credentials;
pub mod error;

pub use config::{NordataConfig, ProfileConfig, StoreConfig, WarehouseConfig};
pub use credentials::Credentials;
pub use error::{ConfigError, ConfigResult};
