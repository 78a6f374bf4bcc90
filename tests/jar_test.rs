use cookiestore::cookies::canonical_cookie::CanonicalCookie;
use cookiestore::cookies::error::CookieRejection;
use cookiestore::cookies::jar::CookieJar;
use cookiestore::store::CookieBackend;
use std::sync::Arc;
use std::thread;
use time::OffsetDateTime;

#[test]
fn test_script_write_and_read() {
    let jar = CookieJar::new("https://example.com/foo").unwrap();
    jar.set_cookie_string("foo=bar; Path=/");

    let cookies = jar.visible_cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[0].value, "bar");
    assert_eq!(cookies[0].path, "/");
    assert!(cookies[0].host_only);
}

#[test]
fn test_path_visibility() {
    let jar = CookieJar::new("https://example.com/foo/bar").unwrap();

    jar.set_cookie_string("root=val; Path=/");
    jar.set_cookie_string("foo=val; Path=/foo");
    jar.set_cookie_string("baz=val; Path=/baz");

    let cookies = jar.visible_cookies();
    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[1].name, "root");
    assert_eq!(jar.total_cookie_count(), 3);
}

#[test]
fn test_backend_round_trip() {
    let jar = CookieJar::new("https://example.com/").unwrap();
    jar.write_one("a=1;path=/");
    jar.write_one("b=2;path=/;secure");
    assert_eq!(jar.read_all(), "a=1; b=2");
}

#[test]
fn test_attribute_names_case_insensitive() {
    let jar = CookieJar::new("https://app.example.com/").unwrap();
    jar.set_cookie_string("a=1; PATH=/; DOMAIN=example.com; SECURE");
    let cookie = jar.visible_cookies().remove(0);
    assert_eq!(cookie.domain, "example.com");
    assert!(!cookie.host_only);
    assert!(cookie.secure);
}

#[test]
fn test_future_expiry_kept() {
    let jar = CookieJar::new("https://example.com/").unwrap();
    jar.set_cookie_string("a=1;expires=Fri, 01 Jan 2100 00:00:00 GMT;path=/");
    let cookie = jar.visible_cookies().remove(0);
    assert_eq!(cookie.expiration_time.unwrap().year(), 2100);
}

#[test]
fn test_supercookie_refused() {
    let jar = CookieJar::new("https://user.github.io/").unwrap();
    assert_eq!(
        jar.try_set_cookie_string("track=1; Domain=github.io"),
        Err(CookieRejection::PublicSuffix)
    );
    assert!(jar.try_set_cookie_string("mine=1; Domain=user.github.io").is_ok());
}

#[test]
fn test_server_cookie_not_visible_to_other_host() {
    let jar = CookieJar::new("https://a.example.com/").unwrap();
    let now = OffsetDateTime::now_utc();
    jar.set_canonical_cookie(CanonicalCookie::new("x", "1", "b.example.com", "/", now));
    assert_eq!(jar.cookie_string(), "");
    assert_eq!(jar.total_cookie_count(), 1);
}

#[test]
fn test_shared_jar_across_threads() {
    let jar = Arc::new(CookieJar::new("https://example.com/").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let jar = Arc::clone(&jar);
            thread::spawn(move || {
                for i in 0..5 {
                    jar.write_one(&format!("t{t}_{i}=v;path=/"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(jar.total_cookie_count(), 20);
    assert_eq!(jar.read_all().split("; ").count(), 20);
}
