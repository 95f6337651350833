//! Percent-encoding shared by every host strategy.
//!
//! Everything except ASCII alphanumerics and `-._~` is escaped. Path segments
//! use upper-case hex (`%2F`); query values use lower-case hex (`%2f`), which
//! is what BitBucket emits for the `at=` branch parameter.

use crate::error::UrlError;

pub fn encode_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Encodes each `/`-separated segment of `value`, keeping the separators.
pub fn encode_path(value: &str) -> String {
    value
        .split('/')
        .map(encode_path_segment)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn encode_query_value(value: &str) -> String {
    let encoded = urlencoding::encode(value);
    let mut out = String::with_capacity(encoded.len());
    let mut hex_left = 0;
    for ch in encoded.chars() {
        if hex_left > 0 {
            out.push(ch.to_ascii_lowercase());
            hex_left -= 1;
        } else {
            if ch == '%' {
                hex_left = 2;
            }
            out.push(ch);
        }
    }
    out
}

pub fn decode(value: &str) -> Result<String, UrlError> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| UrlError::encoding("value", err.to_string()))
}

/// Rejects control characters, which have no meaningful rendering in an
/// address bar even though they could be escaped.
pub fn check_representable(field: &'static str, value: &str) -> Result<(), UrlError> {
    match value.chars().find(|c| c.is_control()) {
        Some(c) => Err(UrlError::encoding(
            field,
            format!("contains control character U+{:04X}", u32::from(c)),
        )),
        None => Ok(()),
    }
}
