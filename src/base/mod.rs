//! Base types shared by the store and the jar.
//!
//! - [`CookieError`](cookieerror::CookieError): errors of the store surface
//! - [`encoding`]: percent-encoding used for cookie names and values

pub mod cookieerror;
pub mod encoding;

#[cfg(test)]
mod tests;
