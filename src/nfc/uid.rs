use std::{fmt, sync::LazyLock};

use regex::Regex;

/// Seven hex bytes, colon separated, uppercase.
const UID_PATTERN: &str = r"^([0-9A-F]{2}:){6}[0-9A-F]{2}$";

static UID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UID_PATTERN).expect("UID pattern is a valid regex"));

/// A tag identifier as read from the card, in its colon separated text form.
///
/// The text is kept even when it does not match the expected 7-byte layout so
/// that it can be shown back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(String);

impl Uid {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(":");

        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        is_valid_uid(&self.0)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid_uid(s: &str) -> bool {
    UID_REGEX.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bytes_as_uppercase_pairs() {
        let uid = Uid::from_bytes(&[0x04, 0xa1, 0x2b, 0x00, 0xff, 0x3c, 0x80]);
        assert_eq!(uid.as_str(), "04:A1:2B:00:FF:3C:80");
        assert!(uid.is_valid());
    }

    #[test]
    fn four_byte_uid_is_invalid() {
        let uid = Uid::from_bytes(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(uid.to_string(), "DE:AD:BE:EF");
        assert!(!uid.is_valid());
    }

    #[test]
    fn empty_response_is_invalid() {
        let uid = Uid::from_bytes(&[]);
        assert_eq!(uid.as_str(), "");
        assert!(!uid.is_valid());
    }

    #[test]
    fn pattern_accepts_exactly_seven_pairs() {
        assert!(is_valid_uid("04:A1:2B:00:FF:3C:80"));

        assert!(!is_valid_uid("04:A1:2B:00:FF:3C"));
        assert!(!is_valid_uid("04:A1:2B:00:FF:3C:80:11"));
        assert!(!is_valid_uid("04:a1:2b:00:ff:3c:80"));
        assert!(!is_valid_uid("04-A1-2B-00-FF-3C-80"));
        assert!(!is_valid_uid("04:A1:2B:00:FF:3C:80:"));
        assert!(!is_valid_uid(" 04:A1:2B:00:FF:3C:80"));
        assert!(!is_valid_uid("04:A1:2B:00:FF:3C:8G"));
    }
}
