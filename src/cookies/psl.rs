//! Domain attribute validation backed by the Public Suffix List.
//!
//! A script may only widen a cookie to its own host or a parent of it, and
//! never to a public suffix such as `com`, `co.uk` or `github.io`.

use crate::cookies::error::CookieRejection;
use psl::{List, Psl};

/// True when `domain` is itself a public suffix.
pub fn is_public_suffix(domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    List.suffix(domain.as_bytes())
        .is_some_and(|suffix| suffix.as_bytes() == domain.as_bytes())
}

/// True when `host` equals `domain` or is a subdomain of it.
pub fn domain_matches(domain: &str, host: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    host.len() > domain.len()
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
        && host
            .get(host.len() - domain.len()..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(domain))
}

/// Validate a `Domain` attribute written from a document on `host`.
///
/// Returns the normalized domain: lowercase, without a leading dot.
pub fn check_cookie_domain(domain: &str, host: &str) -> Result<String, CookieRejection> {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    if domain.is_empty() || !domain_matches(&domain, host) {
        return Err(CookieRejection::DomainMismatch);
    }
    // A host may always scope a cookie to itself, even a private suffix host.
    if is_public_suffix(&domain) && !host.eq_ignore_ascii_case(&domain) {
        return Err(CookieRejection::PublicSuffix);
    }
    Ok(domain)
}
