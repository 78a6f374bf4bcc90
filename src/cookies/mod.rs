//! The in-memory document cookie jar.
//!
//! [`CookieJar`](jar::CookieJar) holds cookies the way a browser profile
//! does and exposes them to one document through the `document.cookie`
//! string. It implements [`CookieBackend`](crate::store::CookieBackend), so a
//! [`CookieStore`](crate::store::CookieStore) can run against it without a
//! browser.
//!
//! # Architecture
//!
//! | Chromium (C++) | cookiestore (Rust) | Responsibility |
//! |----------------|--------------------|----------------|
//! | `net::CookieMonster` | [`CookieJar`](jar::CookieJar) | Cookie jar with LRU eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single cookie representation |
//! | `net::registry_controlled_domains` | [`psl`] | Public suffix checks |
//!
//! # Script writes
//!
//! ```rust
//! use cookiestore::cookies::jar::CookieJar;
//!
//! let jar = CookieJar::new("https://app.example.com/admin/")?;
//! jar.set_cookie_string("theme=dark;path=/");
//! jar.set_cookie_string("sid=1; HttpOnly"); // refused, scripts cannot set HttpOnly
//! assert_eq!(jar.cookie_string(), "theme=dark");
//! # Ok::<(), cookiestore::base::cookieerror::CookieError>(())
//! ```

pub mod canonical_cookie;
pub mod error;
pub mod jar;
pub mod psl;
