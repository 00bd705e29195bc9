use std::fs;
use std::path::{Path, PathBuf};

use nordata_store::TransferConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding `profile.profile_name`.
pub const ENV_PROFILE: &str = "NORDATA_PROFILE";
/// Environment variable overriding `profile.region_name`.
pub const ENV_REGION: &str = "NORDATA_REGION";
/// Environment variable overriding `store.root`.
pub const ENV_STORE_ROOT: &str = "NORDATA_STORE_ROOT";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NordataConfig {
    pub profile: ProfileConfig,
    pub transfer: TransferConfig,
    pub warehouse: WarehouseConfig,
    pub store: StoreConfig,
}

/// Which credentials profile and region to use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub profile_name: String,
    pub region_name: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            profile_name: "default".into(),
            region_name: "us-west-2".into(),
        }
    }
}

/// Where warehouse connection strings come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Name of the environment variable holding
    /// `host=… dbname=… user=… password=… port=…`.
    pub credentials_env_var: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            credentials_env_var: "REDSHIFT_CREDS".into(),
        }
    }
}

/// Local directory-backed buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory whose subdirectories are buckets.
    pub root: Option<PathBuf>,
}

impl StoreConfig {
    /// Directory of the named bucket, if a root is configured.
    pub fn bucket_path(&self, bucket: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(bucket))
    }
}

impl NordataConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a TOML file. Missing sections and keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Takes the lookup as a closure so tests need not touch the process
    /// environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(profile) = lookup(ENV_PROFILE) {
            self.profile.profile_name = profile;
        }
        if let Some(region) = lookup(ENV_REGION) {
            self.profile.region_name = region;
        }
        if let Some(root) = lookup(ENV_STORE_ROOT) {
            self.store.root = Some(PathBuf::from(root));
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Check the values that have constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        self.transfer
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.profile.profile_name.is_empty() {
            return Err(ConfigError::Invalid("profile_name must not be empty".into()));
        }
        if self.profile.region_name.is_empty() {
            return Err(ConfigError::Invalid("region_name must not be empty".into()));
        }
        if self.warehouse.credentials_env_var.is_empty() {
            return Err(ConfigError::Invalid(
                "credentials_env_var must not be empty".into(),
            ));
        }
        Ok(())
    }
}
