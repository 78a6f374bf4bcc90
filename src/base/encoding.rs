//! Percent-encoding for cookie names and values.
//!
//! Matches ECMAScript `encodeURIComponent`: every byte except
//! `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, so an encoded value never
//! contains `;`, `=`, `,` or whitespace.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Bytes left untouched by [`encode`].
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a cookie name or value.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Percent-decode a cookie name or value.
///
/// Sequences that do not decode to UTF-8 leave the input as it was.
pub fn decode(input: &str) -> Cow<'_, str> {
    match percent_decode_str(input).decode_utf8() {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(input = %input, error = %e, "cookie text is not valid percent-encoded UTF-8");
            Cow::Borrowed(input)
        }
    }
}
