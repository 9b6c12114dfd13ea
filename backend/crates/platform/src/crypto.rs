//! base64url (RFC 4648 section 5, unpadded), the encoding of every JWT segment

use base64::{Engine, engine::general_purpose};

pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Strict decode: padding, non-alphabet characters and non-zero trailing
/// bits are all rejected.
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64url_has_no_padding_or_unsafe_chars() {
        let encoded = to_base64url(&[0xfb, 0xff, 0xfe, 0x01]);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(from_base64url(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe, 0x01]);
    }

    #[test]
    fn test_decode_is_strict() {
        // "QQ" is the canonical encoding of "A"; "QR" differs only in trailing bits
        assert_eq!(from_base64url("QQ").unwrap(), b"A");
        assert!(from_base64url("QR").is_err());
        assert!(from_base64url("QQ==").is_err());
        assert!(from_base64url("Q.Q").is_err());
    }
}
