//! Prefixed, JSON-valued cookie access.
//!
//! [`CookieStore`] maps a structured `(key, value, options)` view onto a flat
//! document cookie string reached through a [`CookieBackend`]:
//!
//! - `set` writes `encode(prefix + key)=encode(json)` plus attributes
//! - `get` reads everything back, finds `prefix + key` and decodes the JSON
//! - `remove` writes an empty value that expired a day ago
//! - `all` returns every visible cookie, prefixed or not
//!
//! ```
//! use cookiestore::cookies::jar::CookieJar;
//! use cookiestore::store::{CookieOptions, CookieStore};
//! use serde_json::json;
//!
//! let store = CookieStore::new(CookieJar::new("https://example.com/")?);
//! store.set("user", &json!({"name": "ada"}), CookieOptions::new().expires(7))?;
//! assert_eq!(store.get("user")?, json!({"name": "ada"}));
//!
//! store.remove("user")?;
//! assert_eq!(store.get("user")?, json!({}));
//! # Ok::<(), cookiestore::base::cookieerror::CookieError>(())
//! ```

pub mod backend;
pub mod config;
#[cfg(feature = "wasm")]
pub mod document;
pub mod key;
pub mod options;

pub use self::backend::CookieBackend;
pub use self::config::{StoreConfig, DEFAULT_PREFIX};
#[cfg(feature = "wasm")]
pub use self::document::DocumentCookie;
pub use self::key::{CookieKey, Keys};
pub use self::options::{CookieAttributes, CookieDefaults, CookieOptions, Expiry};

use crate::base::cookieerror::CookieError;
use crate::base::encoding::{decode, encode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Cookie accessor over a document cookie backend.
#[derive(Debug)]
pub struct CookieStore<B> {
    backend: B,
    config: StoreConfig,
}

impl<B: CookieBackend> CookieStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Read the JSON value stored under `key`.
    ///
    /// Absent entries and entries that are not valid JSON both come back as
    /// an empty object. Only an invalid key is an error.
    pub fn get<K>(&self, key: K) -> Result<Value, CookieError>
    where
        K: TryInto<CookieKey, Error = CookieError>,
    {
        let key = key.try_into()?;
        Ok(self
            .lookup::<Value>(key.as_str())
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    /// Read the value stored under `key` as `T`.
    ///
    /// Returns `None` when the entry is absent or does not decode into `T`.
    pub fn get_as<T, K>(&self, key: K) -> Result<Option<T>, CookieError>
    where
        T: DeserializeOwned,
        K: TryInto<CookieKey, Error = CookieError>,
    {
        let key = key.try_into()?;
        Ok(self.lookup(key.as_str()))
    }

    fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let name = format!("{}{}", self.config.prefix, key);
        let raw = self.all().remove(&name);
        let Some(raw) = raw else {
            tracing::debug!(name = %name, "cookie not found");
            return None;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "cookie value is not valid JSON");
                None
            }
        }
    }

    /// Store `value` as JSON under `key`.
    ///
    /// `options` is either a [`CookieOptions`] or a bare expiry (days,
    /// a date string, an [`OffsetDateTime`] or an [`Expiry`]).
    ///
    /// Fails with [`CookieError::EmptyName`] when both the prefix and `key`
    /// are empty, since the cookie would have no name.
    pub fn set<T>(
        &self,
        key: &str,
        value: &T,
        options: impl Into<CookieOptions>,
    ) -> Result<&Self, CookieError>
    where
        T: Serialize + ?Sized,
    {
        let fragment = self.fragment(key, value, &options.into(), OffsetDateTime::now_utc())?;
        tracing::debug!(key = %key, fragment = %fragment, "writing cookie");
        self.backend.write_one(&fragment);
        Ok(self)
    }

    /// Build the cookie line `set` writes, as of `now`.
    pub fn fragment<T>(
        &self,
        key: &str,
        value: &T,
        options: &CookieOptions,
        now: OffsetDateTime,
    ) -> Result<String, CookieError>
    where
        T: Serialize + ?Sized,
    {
        if self.config.prefix.is_empty() && key.is_empty() {
            return Err(CookieError::EmptyName);
        }
        let json = serde_json::to_string(value).map_err(CookieError::Serialize)?;
        let attributes = CookieAttributes::resolve(options, &self.config.defaults, now)?;
        Ok(format!(
            "{}={}{}",
            encode(&format!("{}{}", self.config.prefix, key)),
            encode(&json),
            attributes.render()?
        ))
    }

    /// Delete one key or a list of keys, in order.
    pub fn remove(&self, keys: impl Into<Keys>) -> Result<&Self, CookieError> {
        let keys = keys.into();
        for key in keys.iter() {
            self.set(key, "", Expiry::Days(-1.0))?;
        }
        Ok(self)
    }

    /// Every cookie visible in the document, keyed by its decoded name.
    ///
    /// Names are not stripped of the prefix, and cookies written by other
    /// code appear alongside this store's own.
    pub fn all(&self) -> HashMap<String, String> {
        let raw = self.backend.read_all();
        tracing::trace!(raw = %raw, "reading cookies");
        parse_cookie_string(&raw)
    }

    /// Keys of this store's own cookies, prefix removed, sorted.
    pub fn keys(&self) -> Vec<String> {
        let prefix = self.config.prefix.as_str();
        let mut keys: Vec<String> = self
            .all()
            .into_keys()
            .filter_map(|name| name.strip_prefix(prefix).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }
}

/// Split a document cookie string into decoded `name -> value` pairs.
///
/// Entries are separated by `"; "` and split on their first `=`. An entry
/// without `=` has an empty value. Later duplicates win.
pub fn parse_cookie_string(raw: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    if raw.is_empty() {
        return result;
    }
    for entry in raw.split("; ") {
        let (name, value) = entry.split_once('=').unwrap_or((entry, ""));
        result.insert(decode(name).into_owned(), decode(value).into_owned());
    }
    result
}
