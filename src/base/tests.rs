use crate::base::cookieerror::CookieError;
use crate::base::encoding::{decode, encode};

#[test]
fn test_key_errors_classified() {
    assert!(CookieError::MissingKey.is_key_error());
    assert!(CookieError::ObjectKey.is_key_error());
    assert!(!CookieError::ExpiryOutOfRange.is_key_error());
    assert!(!CookieError::invalid_expiry("soon").is_key_error());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        CookieError::invalid_expiry("soon").to_string(),
        "Cookie expiry is not a date: \"soon\""
    );
    assert_eq!(
        CookieError::invalid_document_url("data:text/plain,hi").to_string(),
        "Document URL has no host: data:text/plain,hi"
    );
    assert_eq!(
        CookieError::DocumentUnavailable.to_string(),
        "No HTML document is available"
    );
    assert_eq!(CookieError::EmptyName.to_string(), "Cookie name is empty");
}

#[test]
fn test_encode_decode_json_text() {
    let json = r#"{"name":"张三","tags":["a=b","c; d"]}"#;
    let encoded = encode(json);
    assert!(!encoded.contains(';'));
    assert!(!encoded.contains('='));
    assert!(!encoded.contains(' '));
    assert_eq!(decode(&encoded), json);
}
