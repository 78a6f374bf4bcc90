//! In-memory document cookie jar.
//!
//! [`CookieJar`] applies the rules a browser applies to script cookie writes
//! (domain and path matching, `Secure` and `HttpOnly`, name prefixes, size and
//! count limits) and renders the `document.cookie` string a page would read.

use crate::base::cookieerror::CookieError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::error::CookieRejection;
use crate::cookies::psl;
use crate::store::backend::CookieBackend;
use cookie::Cookie;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum bytes of name plus value (RFC 6265bis).
const MAX_COOKIE_SIZE: usize = 4096;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
/// Chromium uses 3300, but we use a slightly lower limit to keep memory usage predictable.
const MAX_COOKIES_TOTAL: usize = 3000;

/// An in-memory cookie jar seen through one document, the way a page script
/// sees `document.cookie`.
///
/// Clones and [`for_document`](CookieJar::for_document) views share the
/// same cookies, like two tabs of one browser profile.
#[derive(Clone)]
pub struct CookieJar {
    document: Url,
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl std::fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJar")
            .field("document", &self.document.as_str())
            .field("cookies", &self.total_cookie_count())
            .finish()
    }
}

impl CookieJar {
    /// Create an empty jar for the document at `document_url`.
    pub fn new(document_url: &str) -> Result<Self, CookieError> {
        let url =
            Url::parse(document_url).map_err(|_| CookieError::invalid_document_url(document_url))?;
        Self::from_url(url)
    }

    pub fn from_url(document: Url) -> Result<Self, CookieError> {
        if document.host_str().map_or(true, str::is_empty) {
            return Err(CookieError::invalid_document_url(document.as_str()));
        }
        Ok(Self {
            document,
            store: Arc::new(DashMap::new()),
        })
    }

    /// A view of the same cookies from another document.
    pub fn for_document(&self, document_url: &str) -> Result<Self, CookieError> {
        let mut jar = Self::new(document_url)?;
        jar.store = Arc::clone(&self.store);
        Ok(jar)
    }

    pub fn document_url(&self) -> &Url {
        &self.document
    }

    fn host(&self) -> &str {
        self.document.host_str().unwrap_or("")
    }

    fn is_secure_document(&self) -> bool {
        self.document.scheme() == "https"
    }

    /// Apply a script cookie write (`document.cookie = line`).
    ///
    /// Rejected writes are logged and otherwise ignored.
    pub fn set_cookie_string(&self, line: &str) {
        if let Err(reason) = self.try_set_cookie_string(line) {
            tracing::debug!(line = %line, reason = %reason, "cookie write rejected");
        }
    }

    /// Apply a script cookie write, reporting why it was refused.
    pub fn try_set_cookie_string(&self, line: &str) -> Result<(), CookieRejection> {
        let parsed = Cookie::parse(line).map_err(|_| CookieRejection::Malformed)?;
        let now = OffsetDateTime::now_utc();

        if parsed.name().len() + parsed.value().len() > MAX_COOKIE_SIZE {
            return Err(CookieRejection::TooLarge);
        }

        if parsed.http_only().unwrap_or(false) {
            return Err(CookieRejection::HttpOnlyFromScript);
        }

        let secure = parsed.secure().unwrap_or(false);
        let secure_origin = self.is_secure_document();
        if secure && !secure_origin {
            return Err(CookieRejection::InsecureOrigin);
        }

        // Domain logic
        let (domain, host_only) = match parsed.domain().filter(|d| !d.is_empty()) {
            Some(d) => (psl::check_cookie_domain(d, self.host())?, false),
            None => (self.host().to_ascii_lowercase(), true),
        };

        // Path logic
        let path = parsed
            .path()
            .filter(|p| p.starts_with('/'))
            .map(str::to_string)
            .unwrap_or_else(|| default_path(self.document.path()));

        // Expiry logic; Max-Age wins over Expires
        let expiration_time = match parsed.max_age() {
            Some(age) => now.checked_add(age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let cookie = CanonicalCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            secure,
            http_only: false,
            host_only,
            same_site: parsed.same_site().into(),
        };
        cookie.validate_prefix(secure_origin)?;

        if self.find_equivalent(&cookie).is_some_and(|c| c.http_only) {
            return Err(CookieRejection::HttpOnlyFromScript);
        }

        if cookie.is_expired(now) {
            let removed = self.delete_equivalent(&cookie);
            tracing::debug!(name = %cookie.name, removed, "expired cookie write deletes");
            return Ok(());
        }

        self.set_canonical_cookie(cookie);
        Ok(())
    }

    fn find_equivalent(&self, cookie: &CanonicalCookie) -> Option<CanonicalCookie> {
        self.store
            .get(&cookie.domain)
            .and_then(|entry| entry.iter().find(|c| c.is_equivalent(cookie)).cloned())
    }

    fn delete_equivalent(&self, cookie: &CanonicalCookie) -> bool {
        let Some(mut entry) = self.store.get_mut(&cookie.domain) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|c| !c.is_equivalent(cookie));
        before != entry.len()
    }

    /// Insert or replace a cookie, bypassing script restrictions.
    ///
    /// A replaced cookie keeps its original creation time.
    pub fn set_canonical_cookie(&self, mut cookie: CanonicalCookie) {
        let now = OffsetDateTime::now_utc();
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        entry.retain(|c| !c.is_expired(now));

        // Remove existing if name/domain/path match
        if let Some(idx) = entry.iter().position(|c| c.is_equivalent(&cookie)) {
            cookie.creation_time = entry.remove(idx).creation_time;
        }

        // Enforce per-domain limit with LRU eviction
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                let evicted = entry.remove(oldest_idx);
                tracing::debug!(name = %evicted.name, domain = %evicted.domain, "evicted cookie over domain limit");
            } else {
                break;
            }
        }

        entry.push(cookie);
        drop(entry); // Release lock before checking global count

        self.enforce_global_limit();
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, OffsetDateTime)> = None;

            for entry in self.store.iter() {
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let older = oldest
                        .as_ref()
                        .map_or(true, |(_, _, oldest_time)| cookie.creation_time < *oldest_time);
                    if older {
                        oldest = Some((entry.key().clone(), idx, cookie.creation_time));
                    }
                }
            }

            let Some((domain, idx, _)) = oldest else {
                break;
            };
            if let Some(mut entry) = self.store.get_mut(&domain) {
                if idx < entry.len() {
                    entry.remove(idx);
                }
            }
        }
    }

    /// Cookies the document can read, in `document.cookie` order:
    /// longest path first, then oldest first.
    pub fn visible_cookies(&self) -> Vec<CanonicalCookie> {
        let host = self.host();
        let request_path = self.document.path();
        let secure_origin = self.is_secure_document();
        let now = OffsetDateTime::now_utc();
        let mut result = Vec::new();

        for domain in matching_domains(host) {
            let Some(entry) = self.store.get(&domain) else {
                continue;
            };
            for cookie in entry.iter() {
                let domain_ok = if cookie.host_only {
                    cookie.domain.eq_ignore_ascii_case(host)
                } else {
                    psl::domain_matches(&cookie.domain, host)
                };
                if !domain_ok
                    || !path_matches(&cookie.path, request_path)
                    || (cookie.secure && !secure_origin)
                    || cookie.http_only
                    || cookie.is_expired(now)
                {
                    continue;
                }
                result.push(cookie.clone());
            }
        }

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
                .then_with(|| a.name.cmp(&b.name))
        });
        result
    }

    /// The document cookie string: visible `name=value` pairs joined by `"; "`.
    pub fn cookie_string(&self) -> String {
        self.visible_cookies()
            .iter()
            .map(CanonicalCookie::pair)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Snapshot of every stored cookie, visible to this document or not.
    ///
    /// The jar's locks are released before this returns, so the caller may
    /// write to the jar while walking the result.
    pub fn all_cookies(&self) -> Vec<CanonicalCookie> {
        self.store
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect()
    }
}

impl CookieBackend for CookieJar {
    fn read_all(&self) -> String {
        self.cookie_string()
    }

    fn write_one(&self, fragment: &str) {
        self.set_cookie_string(fragment)
    }
}

/// The host itself and all of its parent domains.
fn matching_domains(host: &str) -> Vec<String> {
    let host = host.to_ascii_lowercase();
    let mut domains = vec![host.clone()];
    let mut rest = host.as_str();
    while let Some((_, parent)) = rest.split_once('.') {
        if parent.is_empty() {
            break;
        }
        domains.push(parent.to_string());
        rest = parent;
    }
    domains
}

/// RFC 6265 default-path: the directory of the document path.
fn default_path(document_path: &str) -> String {
    if !document_path.starts_with('/') {
        return "/".to_string();
    }
    match document_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => document_path[..idx].to_string(),
    }
}

/// Check if request path matches cookie path.
/// Implements RFC 6265 path matching.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar() -> CookieJar {
        CookieJar::new("https://app.example.com/admin/users").unwrap()
    }

    #[test]
    fn test_invalid_document_url() {
        assert!(matches!(
            CookieJar::new("not a url"),
            Err(CookieError::InvalidDocumentUrl { .. })
        ));
        assert!(matches!(
            CookieJar::new("data:text/plain,hello"),
            Err(CookieError::InvalidDocumentUrl { .. })
        ));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(default_path("/admin/users"), "/admin");
        assert_eq!(default_path("/admin/"), "/admin");
        assert_eq!(default_path("/index.html"), "/");
        assert_eq!(default_path(""), "/");
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/", "/anything"));
        assert!(path_matches("/admin", "/admin"));
        assert!(path_matches("/admin", "/admin/users"));
        assert!(!path_matches("/admin", "/administrator"));
        assert!(!path_matches("/admin/users", "/admin"));
    }

    #[test]
    fn test_matching_domains() {
        assert_eq!(
            matching_domains("a.Example.com"),
            vec!["a.example.com", "example.com", "com"]
        );
        assert_eq!(matching_domains("localhost"), vec!["localhost"]);
    }

    #[test]
    fn test_write_then_read() {
        let jar = jar();
        jar.set_cookie_string("a=1;path=/");
        jar.set_cookie_string("b=2");
        assert_eq!(jar.cookie_string(), "b=2; a=1");
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let jar = jar();
        jar.set_cookie_string("a=1;path=/");
        jar.set_cookie_string("a=2;path=/");
        assert_eq!(jar.total_cookie_count(), 1);
        assert_eq!(jar.cookie_string(), "a=2");
    }

    #[test]
    fn test_same_name_different_paths_coexist() {
        let jar = jar();
        jar.set_cookie_string("a=root;path=/");
        jar.set_cookie_string("a=deep;path=/admin");
        assert_eq!(jar.cookie_string(), "a=deep; a=root");
    }

    #[test]
    fn test_expired_write_deletes() {
        let jar = jar();
        jar.set_cookie_string("a=1;path=/");
        jar.set_cookie_string("a=;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/");
        assert_eq!(jar.total_cookie_count(), 0);
        assert_eq!(jar.cookie_string(), "");
    }

    #[test]
    fn test_max_age_zero_deletes() {
        let jar = jar();
        jar.set_cookie_string("a=1");
        jar.set_cookie_string("a=1; Max-Age=0");
        assert_eq!(jar.cookie_string(), "");
    }

    #[test]
    fn test_rejections() {
        let jar = jar();
        assert_eq!(
            jar.try_set_cookie_string("a=1; HttpOnly"),
            Err(CookieRejection::HttpOnlyFromScript)
        );
        assert_eq!(
            jar.try_set_cookie_string("a=1;domain=com"),
            Err(CookieRejection::PublicSuffix)
        );
        assert_eq!(
            jar.try_set_cookie_string("a=1;domain=other.org"),
            Err(CookieRejection::DomainMismatch)
        );
        assert_eq!(
            jar.try_set_cookie_string("__Host-a=1;path=/"),
            Err(CookieRejection::InvalidPrefix)
        );
        assert_eq!(
            jar.try_set_cookie_string("no equals sign"),
            Err(CookieRejection::Malformed)
        );
        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_secure_requires_https() {
        let http = CookieJar::new("http://example.com/").unwrap();
        assert_eq!(
            http.try_set_cookie_string("a=1;secure"),
            Err(CookieRejection::InsecureOrigin)
        );

        let https = http.for_document("https://example.com/").unwrap();
        https.set_cookie_string("a=1;secure");
        assert_eq!(https.cookie_string(), "a=1");
        assert_eq!(http.cookie_string(), "");
    }

    #[test]
    fn test_http_only_hidden_and_protected() {
        let jar = jar();
        let now = OffsetDateTime::now_utc();
        jar.set_canonical_cookie(
            CanonicalCookie::new("sid", "server", "app.example.com", "/", now).with_http_only(true),
        );
        assert_eq!(jar.cookie_string(), "");
        assert_eq!(
            jar.try_set_cookie_string("sid=script;path=/"),
            Err(CookieRejection::HttpOnlyFromScript)
        );
        assert_eq!(jar.all_cookies()[0].value, "server");
    }

    #[test]
    fn test_domain_cookie_shared_with_subdomains() {
        let jar = jar();
        jar.set_cookie_string("shared=1;domain=example.com;path=/");
        jar.set_cookie_string("local=1;path=/");

        let sibling = jar.for_document("https://www.example.com/").unwrap();
        assert_eq!(sibling.cookie_string(), "shared=1");
    }

    #[test]
    fn test_domain_limit_evicts_oldest() {
        let jar = jar();
        for i in 0..=MAX_COOKIES_PER_DOMAIN {
            jar.set_cookie_string(&format!("c{i}=v;path=/"));
        }
        assert_eq!(jar.total_cookie_count(), MAX_COOKIES_PER_DOMAIN);
        assert!(!jar.all_cookies().iter().any(|c| c.name == "c0"));
        assert!(jar.all_cookies().iter().any(|c| c.name == "c50"));
    }

    #[test]
    fn test_oversized_value_rejected() {
        let jar = jar();
        let value = "x".repeat(MAX_COOKIE_SIZE);
        assert_eq!(
            jar.try_set_cookie_string(&format!("a={value}")),
            Err(CookieRejection::TooLarge)
        );
        assert!(jar.try_set_cookie_string(&format!("a={}", &value[1..])).is_ok());
    }

    #[test]
    fn test_clear() {
        let jar = jar();
        jar.set_cookie_string("a=1");
        jar.clear();
        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_write_while_walking_snapshot() {
        let jar = jar();
        jar.set_cookie_string("a=1;path=/");
        jar.set_cookie_string("b=2;path=/");
        for cookie in jar.all_cookies() {
            jar.set_cookie_string(&format!("{}=seen;path=/", cookie.name));
            jar.set_cookie_string(&format!("{}_copy=1;path=/", cookie.name));
        }
        assert_eq!(jar.total_cookie_count(), 4);
        assert!(jar.all_cookies().iter().all(|c| c.name.ends_with("_copy") || c.value == "seen"));
    }
}
