use crate::error::{ConfigError, ConfigResult};

pub const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Object-store credentials, used to authorize warehouse COPY and UNLOAD
/// statements against the same buckets.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub token: Option<String>,
}

impl Credentials {
    /// Read credentials through a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(ENV_ACCESS_KEY)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential(ENV_ACCESS_KEY))?;
        let secret_key = lookup(ENV_SECRET_KEY)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential(ENV_SECRET_KEY))?;
        let token = lookup(ENV_SESSION_TOKEN).filter(|v| !v.is_empty());
        Ok(Self {
            access_key,
            secret_key,
            token,
        })
    }

    /// Read credentials from the standard environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The `CREDENTIALS '…'` string for COPY/UNLOAD.
    ///
    /// A missing session token renders as `token=` with no value.
    pub fn copy_credentials(&self) -> String {
        format!(
            "aws_access_key_id={};aws_secret_access_key={};token={}",
            self.access_key,
            self.secret_key,
            self.token.as_deref().unwrap_or("")
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn copy_string_with_token() {
        let c = Credentials::from_lookup(lookup(&[
            (ENV_ACCESS_KEY, "AKIA"),
            (ENV_SECRET_KEY, "s3cr3t"),
            (ENV_SESSION_TOKEN, "tok"),
        ]))
        .unwrap();
        assert_eq!(
            c.copy_credentials(),
            "aws_access_key_id=AKIA;aws_secret_access_key=s3cr3t;token=tok"
        );
    }

    #[test]
    fn copy_string_without_token() {
        let c = Credentials::from_lookup(lookup(&[(ENV_ACCESS_KEY, "A"), (ENV_SECRET_KEY, "S")])).unwrap();
        assert_eq!(c.copy_credentials(), "aws_access_key_id=A;aws_secret_access_key=S;token=");
    }

    #[test]
    fn missing_secret() {
        let err = Credentials::from_lookup(lookup(&[(ENV_ACCESS_KEY, "A")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(ENV_SECRET_KEY)));
    }

    #[test]
    fn debug_redacts() {
        let c = Credentials {
            access_key: "A".into(),
            secret_key: "hidden".into(),
            token: Some("tok".into()),
        };
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hidden"));
        assert!(!dbg.contains("tok\""));
    }
}
