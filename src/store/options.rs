//! Per-write cookie options and their resolution against store defaults.

use crate::base::cookieerror::CookieError;
use serde::{Deserialize, Deserializer};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// `Sun, 19 Oct 2026 12:00:00 GMT`, as written into `;expires=`.
const GMT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// When a cookie expires.
#[derive(Debug, Clone, PartialEq)]
pub enum Expiry {
    /// No `expires` attribute; the cookie lasts for the browsing session.
    Session,
    /// Relative to the time of the write. Negative values lie in the past.
    Days(f64),
    /// An absolute instant.
    At(OffsetDateTime),
    /// A textual date, parsed when the cookie is written.
    Date(String),
}

impl Expiry {
    /// Values that count as "not set" when they come from the defaults.
    fn is_unset(&self) -> bool {
        match self {
            Expiry::Session => true,
            Expiry::Days(days) => *days == 0.0,
            Expiry::Date(text) => text.is_empty(),
            Expiry::At(_) => false,
        }
    }

    /// Resolve to an absolute instant, `None` for a session cookie.
    pub fn resolve(&self, now: OffsetDateTime) -> Result<Option<OffsetDateTime>, CookieError> {
        match self {
            Expiry::Session => Ok(None),
            Expiry::Days(days) => {
                let millis = days * MILLIS_PER_DAY;
                if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
                    return Err(CookieError::ExpiryOutOfRange);
                }
                now.checked_add(Duration::milliseconds(millis as i64))
                    .map(Some)
                    .ok_or(CookieError::ExpiryOutOfRange)
            }
            Expiry::At(at) => Ok(Some(*at)),
            Expiry::Date(text) if text.is_empty() => Ok(None),
            Expiry::Date(text) => parse_date(text).map(Some),
        }
    }
}

impl From<i64> for Expiry {
    fn from(days: i64) -> Self {
        Expiry::Days(days as f64)
    }
}

impl From<i32> for Expiry {
    fn from(days: i32) -> Self {
        Expiry::Days(f64::from(days))
    }
}

impl From<f64> for Expiry {
    fn from(days: f64) -> Self {
        Expiry::Days(days)
    }
}

impl From<OffsetDateTime> for Expiry {
    fn from(at: OffsetDateTime) -> Self {
        Expiry::At(at)
    }
}

impl From<&str> for Expiry {
    fn from(text: &str) -> Self {
        Expiry::Date(text.to_string())
    }
}

impl From<String> for Expiry {
    fn from(text: String) -> Self {
        Expiry::Date(text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpiry {
    Days(f64),
    Date(String),
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawExpiry>::deserialize(deserializer)? {
            None => Expiry::Session,
            Some(RawExpiry::Days(days)) => Expiry::Days(days),
            Some(RawExpiry::Date(text)) => Expiry::Date(text),
        })
    }
}

/// Parse the date forms accepted by [`Expiry::Date`].
pub fn parse_date(text: &str) -> Result<OffsetDateTime, CookieError> {
    let text = text.trim();
    if let Ok(at) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(at);
    }
    if let Ok(at) = OffsetDateTime::parse(text, &Rfc2822) {
        return Ok(at);
    }
    if let Ok(at) = PrimitiveDateTime::parse(text, GMT_FORMAT) {
        return Ok(at.assume_utc());
    }
    if let Ok(day) = Date::parse(text, DATE_FORMAT) {
        return Ok(day.midnight().assume_utc());
    }
    Err(CookieError::invalid_expiry(text))
}

/// Format an instant the way `;expires=` carries it.
pub fn format_gmt(at: OffsetDateTime) -> Result<String, CookieError> {
    at.to_offset(UtcOffset::UTC)
        .format(GMT_FORMAT)
        .map_err(|_| CookieError::ExpiryOutOfRange)
}

/// Options for a single [`CookieStore::set`](crate::store::CookieStore::set).
///
/// Unset fields fall back to the store's [`CookieDefaults`]. A bare expiry
/// converts into options carrying only that expiry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieOptions {
    pub expires: Option<Expiry>,
    pub path: Option<String>,
    pub domain: Option<String>,
    /// `Some(false)` suppresses `;secure` even when the defaults ask for it.
    pub secure: Option<bool>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expires(mut self, expires: impl Into<Expiry>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }
}

impl From<Expiry> for CookieOptions {
    fn from(expires: Expiry) -> Self {
        CookieOptions {
            expires: Some(expires),
            ..Default::default()
        }
    }
}

impl From<i64> for CookieOptions {
    fn from(days: i64) -> Self {
        Expiry::from(days).into()
    }
}

impl From<i32> for CookieOptions {
    fn from(days: i32) -> Self {
        Expiry::from(days).into()
    }
}

impl From<f64> for CookieOptions {
    fn from(days: f64) -> Self {
        Expiry::from(days).into()
    }
}

impl From<OffsetDateTime> for CookieOptions {
    fn from(at: OffsetDateTime) -> Self {
        Expiry::from(at).into()
    }
}

impl From<&str> for CookieOptions {
    fn from(text: &str) -> Self {
        Expiry::from(text).into()
    }
}

/// Attribute values used when a write leaves them unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CookieDefaults {
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub expires: Option<Expiry>,
}

/// Attributes of one write after defaults have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieAttributes {
    pub expires: Option<OffsetDateTime>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieAttributes {
    pub fn resolve(
        options: &CookieOptions,
        defaults: &CookieDefaults,
        now: OffsetDateTime,
    ) -> Result<Self, CookieError> {
        let expires = match (&options.expires, &defaults.expires) {
            (Some(explicit), _) => explicit.resolve(now)?,
            (None, Some(default)) if !default.is_unset() => default.resolve(now)?,
            (None, _) => None,
        };

        let secure = match options.secure {
            Some(false) => false,
            Some(true) => true,
            None => defaults.secure,
        };

        Ok(Self {
            expires,
            path: non_empty(&options.path).or_else(|| non_empty(&defaults.path)),
            domain: non_empty(&options.domain).or_else(|| non_empty(&defaults.domain)),
            secure,
        })
    }

    /// Render the `;expires=…;path=…;domain=…;secure` tail of a cookie write.
    pub fn render(&self) -> Result<String, CookieError> {
        let mut out = String::new();
        if let Some(expires) = self.expires {
            out.push_str(";expires=");
            out.push_str(&format_gmt(expires)?);
        }
        if let Some(path) = &self.path {
            out.push_str(";path=");
            out.push_str(path);
        }
        if let Some(domain) = &self.domain {
            out.push_str(";domain=");
            out.push_str(domain);
        }
        if self.secure {
            out.push_str(";secure");
        }
        Ok(out)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
