// content.rs
//! Content negotiation helpers: MIME parsing, Accept matching and charset
//! conversion for request and response bodies.

use encoding_rs::{Encoding, UTF_8};
use mime::Mime;

/// Parse a Content-Type/Accept header value into a structured MIME type.
/// Comparison of type and subtype is case-insensitive after parsing.
pub(crate) fn parse_mime(value: &str) -> Option<Mime> {
    value.trim().parse().ok()
}

/// True for XML content, including `+xml` suffixed types.
pub(crate) fn is_xml(mime: &Mime) -> bool {
    mime.subtype() == mime::XML || mime.suffix() == Some(mime::XML)
}

/// True for JSON content, including `+json` suffixed types.
pub(crate) fn is_json(mime: &Mime) -> bool {
    mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
}

/// Strict Accept check: type and subtype must both line up. A response
/// without a Content-Type never satisfies an explicit Accept.
pub(crate) fn accept_matches(accept: &Mime, response_content_type: Option<&str>) -> bool {
    match response_content_type.and_then(parse_mime) {
        Some(actual) => actual.type_() == accept.type_() && actual.subtype() == accept.subtype(),
        None => false,
    }
}

/// Encode an outgoing body.
///
/// A declared charset selects the encoder (UTF-8 passes bytes through).
/// Without one the body goes out in the platform-default single-byte
/// encoding, where characters outside it transliterate to `?`. An unknown
/// charset label falls back to the same default path.
pub(crate) fn encode_body(text: &str, charset: Option<&str>) -> Vec<u8> {
    match charset.and_then(|label| Encoding::for_label(label.as_bytes())) {
        Some(encoding) if encoding == UTF_8 => text.as_bytes().to_vec(),
        Some(encoding) => encoding.encode(text).0.into_owned(),
        None => text
            .chars()
            .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
            .collect(),
    }
}

/// Decode a response body using the charset declared on its Content-Type,
/// defaulting to UTF-8.
pub(crate) fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(parse_mime)
        .and_then(|m| {
            m.get_param(mime::CHARSET)
                .and_then(|charset| Encoding::for_label(charset.as_str().as_bytes()))
        })
        .unwrap_or(UTF_8);
    encoding.decode(body).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_case_subtype_is_xml() {
        let m = parse_mime("Application/Xml;charset=utf-8").unwrap();
        assert!(is_xml(&m));
        assert!(!is_json(&m));
    }

    #[test]
    fn suffixed_types_are_recognized() {
        assert!(is_xml(&parse_mime("application/soap+xml").unwrap()));
        assert!(is_json(&parse_mime("application/problem+json").unwrap()));
    }

    #[test]
    fn accept_match_ignores_parameters_and_case() {
        let accept = parse_mime("application/xml").unwrap();
        assert!(accept_matches(&accept, Some("Application/XML; charset=utf-8")));
        assert!(!accept_matches(&accept, Some("application/json")));
        assert!(!accept_matches(&accept, None));
    }

    #[test]
    fn utf8_charset_preserves_non_ascii() {
        let encoded = encode_body("Иван", Some("utf-8"));
        assert_eq!(encoded, "Иван".as_bytes());
    }

    #[test]
    fn missing_charset_transliterates_to_question_marks() {
        let encoded = encode_body("Put Иван", None);
        assert_eq!(encoded, b"Put ????");
    }

    #[test]
    fn missing_charset_keeps_single_byte_characters() {
        let encoded = encode_body("caf\u{e9}", None);
        assert_eq!(encoded, b"caf\xE9");
    }

    #[test]
    fn decode_defaults_to_utf8() {
        let decoded = decode_body("Hello, 世界".as_bytes(), Some("text/plain"));
        assert_eq!(decoded, "Hello, 世界");
    }

    #[test]
    fn decode_honors_declared_charset() {
        // "Tomáš" in ISO-8859-2
        let body = b"Tom\xE1\xB9";
        let decoded = decode_body(body, Some("text/plain; charset=ISO-8859-2"));
        assert_eq!(decoded, "Tomáš");
    }

    #[test]
    fn decode_without_content_type_is_lossy_utf8() {
        let decoded = decode_body(&[0xFF, 0xFE], None);
        assert!(decoded.contains('\u{FFFD}'));
    }
}
