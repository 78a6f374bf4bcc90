//! Public Suffix List integration tests.

use cookiestore::cookies::error::CookieRejection;
use cookiestore::cookies::psl::{check_cookie_domain, domain_matches, is_public_suffix};

#[test]
fn test_tld_is_public_suffix() {
    assert!(is_public_suffix("com"));
    assert!(is_public_suffix("org"));
    assert!(is_public_suffix("net"));
    assert!(is_public_suffix("co.uk"));
    assert!(is_public_suffix("com.au"));
}

#[test]
fn test_domain_not_public_suffix() {
    assert!(!is_public_suffix("example.com"));
    assert!(!is_public_suffix("google.com"));
    assert!(!is_public_suffix("bbc.co.uk"));
}

#[test]
fn test_parent_domain_allowed() {
    assert_eq!(
        check_cookie_domain("example.com", "www.example.com"),
        Ok("example.com".to_string())
    );
    assert_eq!(
        check_cookie_domain("bbc.co.uk", "www.bbc.co.uk"),
        Ok("bbc.co.uk".to_string())
    );
}

#[test]
fn test_supercookie_prevention() {
    assert_eq!(
        check_cookie_domain(".com", "example.com"),
        Err(CookieRejection::PublicSuffix)
    );
    assert_eq!(
        check_cookie_domain("co.uk", "example.co.uk"),
        Err(CookieRejection::PublicSuffix)
    );
}

#[test]
fn test_child_domain_refused() {
    assert_eq!(
        check_cookie_domain("www.example.com", "example.com"),
        Err(CookieRejection::DomainMismatch)
    );
    assert!(!domain_matches("www.example.com", "example.com"));
}
