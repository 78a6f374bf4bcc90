//! Cookie store configuration.

use crate::base::cookieerror::CookieError;
use crate::store::options::{CookieDefaults, Expiry};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Prefix applied to every key when none is configured.
pub const DEFAULT_PREFIX: &str = "app_";

/// Configuration for a [`CookieStore`](crate::store::CookieStore).
///
/// Fixed at construction; a store never mutates its own configuration.
///
/// ```
/// use cookiestore::store::config::StoreConfig;
///
/// let config = StoreConfig::from_json(r#"{"prefix":"admin_","defaults":{"path":"/","expires":7}}"#)?;
/// assert_eq!(config.prefix, "admin_");
/// # Ok::<(), cookiestore::base::cookieerror::CookieError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Namespace prepended to every key the store reads or writes
    pub prefix: String,
    /// Attribute values for writes that leave them unset
    pub defaults: CookieDefaults,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            defaults: CookieDefaults::default(),
        }
    }
}

impl StoreConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the default path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.defaults.path = Some(path.into());
        self
    }

    /// Set the default domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.defaults.domain = Some(domain.into());
        self
    }

    /// Mark cookies secure unless a write says otherwise.
    pub fn secure(mut self, secure: bool) -> Self {
        self.defaults.secure = secure;
        self
    }

    /// Set the default expiry.
    pub fn expires(mut self, expires: impl Into<Expiry>) -> Self {
        self.defaults.expires = Some(expires.into());
        self
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        serde_json::from_str(json).map_err(CookieError::ConfigParse)
    }

    /// Load a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, CookieError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), prefix = %config.prefix, "loaded cookie store config");
        Ok(config)
    }
}
