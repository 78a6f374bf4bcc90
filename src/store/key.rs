//! Lookup keys.

use crate::base::cookieerror::CookieError;
use serde_json::Value;

/// A validated key for [`CookieStore::get`](crate::store::CookieStore::get).
///
/// Falsy inputs (`""`, `null`, `false`, `0`) are rejected as missing and
/// JSON objects or arrays are rejected outright. `true` and other numbers
/// are keyed by their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieKey(String);

impl CookieKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CookieKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CookieKey {
    type Error = CookieError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        if key.is_empty() {
            return Err(CookieError::MissingKey);
        }
        Ok(CookieKey(key.to_string()))
    }
}

impl TryFrom<String> for CookieKey {
    type Error = CookieError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        if key.is_empty() {
            return Err(CookieError::MissingKey);
        }
        Ok(CookieKey(key))
    }
}

impl TryFrom<&String> for CookieKey {
    type Error = CookieError;

    fn try_from(key: &String) -> Result<Self, Self::Error> {
        CookieKey::try_from(key.as_str())
    }
}

impl TryFrom<&Value> for CookieKey {
    type Error = CookieError;

    fn try_from(key: &Value) -> Result<Self, Self::Error> {
        match key {
            Value::Null | Value::Bool(false) => Err(CookieError::MissingKey),
            Value::Object(_) | Value::Array(_) => Err(CookieError::ObjectKey),
            Value::Bool(true) => Ok(CookieKey("true".to_string())),
            Value::String(s) => CookieKey::try_from(s.as_str()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i == 0 {
                        return Err(CookieError::MissingKey);
                    }
                    return Ok(CookieKey(i.to_string()));
                }
                if let Some(u) = n.as_u64() {
                    return Ok(CookieKey(u.to_string()));
                }
                match n.as_f64() {
                    Some(f) if f == 0.0 => Err(CookieError::MissingKey),
                    // Whole floats print without a fraction, like `String(2.0)`.
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
                        Ok(CookieKey(format!("{}", f as i64)))
                    }
                    Some(f) => Ok(CookieKey(f.to_string())),
                    None => Err(CookieError::MissingKey),
                }
            }
        }
    }
}

impl TryFrom<Value> for CookieKey {
    type Error = CookieError;

    fn try_from(key: Value) -> Result<Self, Self::Error> {
        CookieKey::try_from(&key)
    }
}

/// One key or an ordered list of keys, as accepted by
/// [`CookieStore::remove`](crate::store::CookieStore::remove).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keys(Vec<String>);

impl Keys {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Keys {
    fn from(key: &str) -> Self {
        Keys(vec![key.to_string()])
    }
}

impl From<String> for Keys {
    fn from(key: String) -> Self {
        Keys(vec![key])
    }
}

impl From<Vec<String>> for Keys {
    fn from(keys: Vec<String>) -> Self {
        Keys(keys)
    }
}

impl From<Vec<&str>> for Keys {
    fn from(keys: Vec<&str>) -> Self {
        Keys(keys.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Keys {
    fn from(keys: &[&str]) -> Self {
        Keys(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(keys: [&str; N]) -> Self {
        Keys(keys.iter().map(|k| k.to_string()).collect())
    }
}
