use thiserror::Error;

/// Errors surfaced by [`CookieStore`](crate::store::CookieStore) and its configuration.
///
/// Key errors are programmer errors and are raised before the backend is
/// touched. Malformed stored values are never reported here; `get` degrades
/// them to an empty object instead.
#[derive(Debug, Error)]
pub enum CookieError {
    // Key Errors
    #[error("Cookie key is missing")]
    MissingKey,
    #[error("Cookie key must not be an object")]
    ObjectKey,

    // Expiry Errors
    #[error("Cookie expiry is not a date: {value:?}")]
    InvalidExpiry { value: String },
    #[error("Cookie expiry is out of range")]
    ExpiryOutOfRange,

    // Value Errors
    #[error("Cookie name is empty")]
    EmptyName,
    #[error("Cookie value could not be serialized: {0}")]
    Serialize(#[source] serde_json::Error),

    // Jar Errors
    #[error("Document URL has no host: {url}")]
    InvalidDocumentUrl { url: String },
    #[error("No HTML document is available")]
    DocumentUnavailable,

    // Configuration Errors
    #[error("Cookie store configuration is invalid: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("Cookie store configuration could not be read: {0}")]
    ConfigIo(#[from] std::io::Error),
}

impl CookieError {
    pub fn invalid_expiry(value: impl Into<String>) -> Self {
        CookieError::InvalidExpiry {
            value: value.into(),
        }
    }

    pub fn invalid_document_url(url: impl Into<String>) -> Self {
        CookieError::InvalidDocumentUrl { url: url.into() }
    }

    /// True for errors caused by a bad key argument.
    pub fn is_key_error(&self) -> bool {
        matches!(self, CookieError::MissingKey | CookieError::ObjectKey)
    }
}
