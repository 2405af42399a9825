//! Rancher API credentials
//!
//! Rancher authenticates API calls with an access key / secret key pair
//! sent as HTTP basic auth.

use std::fmt;

/// Environment variable holding the API access key
pub const ACCESS_KEY_ENV: &str = "RANCHER_ACCESS_KEY";

/// Environment variable holding the API secret key
pub const SECRET_KEY_ENV: &str = "RANCHER_SECRET_KEY";

/// API key pair
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    access_key: String,
    secret_key: String,
}

impl ApiCredentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Build from optional parts; both halves must be present and non-empty
    pub fn from_parts(access_key: Option<&str>, secret_key: Option<&str>) -> Option<Self> {
        match (access_key, secret_key) {
            (Some(a), Some(s)) if !a.is_empty() && !s.is_empty() => Some(Self::new(a, s)),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!("Ignoring incomplete API key pair");
                None
            },
            _ => None,
        }
    }

    /// Read the key pair from `RANCHER_ACCESS_KEY` / `RANCHER_SECRET_KEY`
    pub fn from_env() -> Option<Self> {
        let access = std::env::var(ACCESS_KEY_ENV).ok();
        let secret = std::env::var(SECRET_KEY_ENV).ok();
        Self::from_parts(access.as_deref(), secret.as_deref())
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

// Security: never print the secret key
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .finish()
    }
}
