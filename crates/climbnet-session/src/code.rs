//! Human-friendly session codes.
//!
//! A code is [`SessionCode::LEN`] characters from an alphabet without
//! look-alike glyphs. The first character carries the region index so a
//! joining player only needs the code, not the region.

use std::fmt;

use rand::Rng;

const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// A generated session name, e.g. `"C7KQ2M"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionCode(String);

impl SessionCode {
    pub const LEN: usize = 6;
    /// Regions that fit in the first character.
    pub const MAX_REGIONS: usize = ALPHABET.len();

    /// Generates a random code for `region_index`.
    ///
    /// Indices past [`MAX_REGIONS`](Self::MAX_REGIONS) wrap around.
    pub fn generate(region_index: usize) -> Self {
        let mut rng = rand::rng();
        let mut code = String::with_capacity(Self::LEN);
        code.push(ALPHABET[region_index % ALPHABET.len()] as char);
        for _ in 1..Self::LEN {
            code.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
        }
        Self(code)
    }

    /// Parses user input. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_ascii_uppercase();
        let valid = code.len() == Self::LEN && code.bytes().all(|b| ALPHABET.contains(&b));
        valid.then_some(Self(code))
    }

    /// The region index encoded in the first character.
    pub fn decode_region(&self) -> Option<usize> {
        let first = *self.0.as_bytes().first()?;
        ALPHABET.iter().position(|&b| b == first)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SessionCode> for String {
    fn from(code: SessionCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // generate / decode_region
    // =========================================================================

    #[test]
    fn test_generate_encodes_region() {
        for region in 0..SessionCode::MAX_REGIONS {
            let code = SessionCode::generate(region);
            assert_eq!(code.as_str().len(), SessionCode::LEN);
            assert_eq!(code.decode_region(), Some(region));
        }
    }

    #[test]
    fn test_generate_output_parses() {
        for _ in 0..100 {
            let code = SessionCode::generate(3);
            assert_eq!(SessionCode::parse(code.as_str()), Some(code));
        }
    }

    #[test]
    fn test_generate_region_wraps() {
        let code = SessionCode::generate(SessionCode::MAX_REGIONS + 2);
        assert_eq!(code.decode_region(), Some(2));
    }

    // =========================================================================
    // parse
    // =========================================================================

    #[test]
    fn test_parse_lowercase_and_whitespace_accepted() {
        let code = SessionCode::parse("  c7kq2m ").expect("valid code");
        assert_eq!(code.as_str(), "C7KQ2M");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(SessionCode::parse("").is_none());
        assert!(SessionCode::parse("ABC").is_none(), "too short");
        assert!(SessionCode::parse("ABCDEFG").is_none(), "too long");
        assert!(SessionCode::parse("ABCDE0").is_none(), "0 is not in the alphabet");
        assert!(SessionCode::parse("ABCDEI").is_none(), "I is not in the alphabet");
    }
}
