use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{WarehouseError, WarehouseResult};

/// Connection parameters parsed from a `key=value key=value` string.
///
/// ```
/// use nordata_warehouse::ConnectionParams;
///
/// let params: ConnectionParams =
///     "host=example.com dbname=dev user=me password=secret port=5439".parse().unwrap();
/// assert_eq!(params.host(), Some("example.com"));
/// assert_eq!(params.port().unwrap(), Some(5439));
/// assert!(!format!("{params:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ConnectionParams {
    values: BTreeMap<String, String>,
}

impl ConnectionParams {
    /// Parse space-separated `key=value` tokens.
    pub fn parse(creds: &str) -> WarehouseResult<Self> {
        let mut values = BTreeMap::new();
        for token in creds.split_whitespace() {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                WarehouseError::MalformedCredentials(format!(
                    "expected key=value, found {:?}",
                    redact_token(token)
                ))
            })?;
            if key.is_empty() {
                return Err(WarehouseError::MalformedCredentials(
                    "empty parameter name".into(),
                ));
            }
            values.insert(key.to_string(), value.to_string());
        }
        if values.is_empty() {
            return Err(WarehouseError::MalformedCredentials(
                "no connection parameters".into(),
            ));
        }
        let params = Self { values };
        params.port()?;
        Ok(params)
    }

    /// Read and parse the named environment variable.
    pub fn from_env(var: &str) -> WarehouseResult<Self> {
        let creds =
            std::env::var(var).map_err(|_| WarehouseError::MissingEnvVar(var.to_string()))?;
        Self::parse(&creds)
    }

    /// Look up any parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    pub fn dbname(&self) -> Option<&str> {
        self.get("dbname")
    }

    pub fn user(&self) -> Option<&str> {
        self.get("user")
    }

    pub fn password(&self) -> Option<&str> {
        self.get("password")
    }

    /// The port, if present. Fails if it is not a valid `u16`.
    pub fn port(&self) -> WarehouseResult<Option<u16>> {
        self.get("port")
            .map(|p| {
                p.parse::<u16>().map_err(|_| {
                    WarehouseError::MalformedCredentials(format!("invalid port {p:?}"))
                })
            })
            .transpose()
    }

    /// All parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn redact_token(token: &str) -> &str {
    if token.starts_with("password") {
        "password…"
    } else {
        token
    }
}

impl FromStr for ConnectionParams {
    type Err = WarehouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            if key == "password" {
                map.entry(key, &"***");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}
