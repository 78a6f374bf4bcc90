//! Reasons a [`CookieJar`](crate::cookies::jar::CookieJar) refuses a script
//! cookie write.
//!
//! Browsers drop such writes without telling the script, so
//! [`CookieJar::set_cookie_string`](crate::cookies::jar::CookieJar::set_cookie_string)
//! only logs them. Use
//! [`CookieJar::try_set_cookie_string`](crate::cookies::jar::CookieJar::try_set_cookie_string)
//! to see the reason.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CookieRejection {
    #[error("Cookie line could not be parsed")]
    Malformed,
    #[error("Cookie name and value exceed the size limit")]
    TooLarge,
    #[error("HttpOnly cookies cannot be set from script")]
    HttpOnlyFromScript,
    #[error("Secure cookies require a secure document")]
    InsecureOrigin,
    #[error("Cookie domain is a public suffix")]
    PublicSuffix,
    #[error("Cookie domain does not match the document host")]
    DomainMismatch,
    #[error("Cookie prefix validation failed")]
    InvalidPrefix,
}
