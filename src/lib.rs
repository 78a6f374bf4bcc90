//! # cookiestore
//!
//! A prefixed, JSON-valued accessor over a document cookie string.
//!
//! [`CookieStore`](store::CookieStore) offers `get`, `set`, `remove` and
//! `all` over whatever implements [`CookieBackend`](store::CookieBackend):
//! the page's own `document.cookie` (`DocumentCookie`, with the `wasm`
//! feature), or the in-memory [`CookieJar`](cookies::jar::CookieJar).
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiestore::cookies::jar::CookieJar;
//! use cookiestore::store::{CookieOptions, CookieStore, StoreConfig};
//! use serde_json::json;
//!
//! let jar = CookieJar::new("https://example.com/")?;
//! let store = CookieStore::with_config(jar, StoreConfig::new().prefix("shop_").path("/"));
//!
//! store
//!     .set("cart", &json!([1, 2, 3]), CookieOptions::new().expires(7))?
//!     .set("lang", "en", 30)?;
//!
//! assert_eq!(store.get("cart")?, json!([1, 2, 3]));
//! assert_eq!(store.all()["shop_lang"], "\"en\"");
//! assert_eq!(store.keys(), vec!["cart", "lang"]);
//! # Ok::<(), cookiestore::base::cookieerror::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and percent-encoding
//! - [`store`] - The cookie accessor, its options and configuration
//! - [`cookies`] - In-memory cookie jar with browser write rules

pub mod base;
pub mod cookies;
pub mod store;
