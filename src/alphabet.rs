use crate::errors::CodecError;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

/// An ordered set of distinct symbols; a symbol's position is its digit value.
///
/// Alphabets are immutable once built. Construction rejects anything that
/// would make decoding ambiguous: fewer than two symbols, or a symbol that
/// appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    char_to_index: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates an alphabet from its symbols in digit order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidAlphabet`] if there are fewer than two
    /// symbols or any symbol is repeated.
    pub fn new(chars: Vec<char>) -> Result<Self, CodecError> {
        if chars.len() < 2 {
            return Err(CodecError::invalid_alphabet(format!(
                "{} symbol(s) given, a numeral system needs at least 2",
                chars.len()
            )));
        }

        let mut char_to_index = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if let Some(first) = char_to_index.insert(c, i) {
                return Err(CodecError::invalid_alphabet(format!(
                    "duplicate symbol '{}' at positions {} and {}",
                    c, first, i
                )));
            }
        }

        Ok(Alphabet {
            chars,
            char_to_index,
        })
    }

    /// Creates an alphabet of `length` consecutive Unicode scalar values
    /// starting at `start`.
    ///
    /// # Errors
    ///
    /// Fails if the range runs past U+10FFFF, crosses the surrogate gap
    /// (U+D800..U+DFFF), or is shorter than two symbols.
    pub fn from_range(start: char, length: usize) -> Result<Self, CodecError> {
        const MAX_UNICODE: u32 = 0x10FFFF;
        const SURROGATE_START: u32 = 0xD800;
        const SURROGATE_END: u32 = 0xDFFF;

        if length < 2 {
            return Self::new(vec![start; length.min(1)]);
        }

        let start = start as u32;
        let end = u32::try_from(length - 1)
            .ok()
            .and_then(|span| start.checked_add(span))
            .filter(|&end| end <= MAX_UNICODE)
            .ok_or_else(|| {
                CodecError::invalid_alphabet(format!(
                    "range of {} symbols from U+{:04X} exceeds U+{:X}",
                    length, start, MAX_UNICODE
                ))
            })?;

        if start <= SURROGATE_END && end >= SURROGATE_START {
            return Err(CodecError::invalid_alphabet(format!(
                "range U+{:04X}..U+{:04X} crosses the surrogate gap (U+D800..U+DFFF)",
                start, end
            )));
        }

        let chars = (start..=end)
            .map(|cp| {
                char::from_u32(cp).ok_or_else(|| {
                    CodecError::invalid_alphabet(format!("invalid codepoint U+{:04X}", cp))
                })
            })
            .collect::<Result<Vec<char>, _>>()?;

        Self::new(chars)
    }

    /// Returns the base (radix): the number of symbols.
    pub fn base(&self) -> usize {
        self.chars.len()
    }

    /// Returns the symbols in digit order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Encodes a digit (0 to base-1) as a symbol.
    ///
    /// Returns `None` if the digit is out of range.
    pub fn encode_digit(&self, digit: usize) -> Option<char> {
        self.chars.get(digit).copied()
    }

    /// Decodes a symbol back to its digit value.
    ///
    /// Returns `None` if the symbol is not in the alphabet.
    pub fn decode_char(&self, c: char) -> Option<usize> {
        self.char_to_index.get(&c).copied()
    }

    pub fn is_power_of_two(&self) -> bool {
        self.base().is_power_of_two()
    }

    /// Information carried by one symbol, in bits (`log2(base)`).
    pub fn bits_per_char(&self) -> f64 {
        (self.base() as f64).log2()
    }

    /// Symbols as shown in error hints; long alphabets are summarized.
    pub(crate) fn describe_symbols(&self) -> String {
        if self.base() <= 96 {
            self.chars.iter().collect()
        } else {
            let head: String = self.chars.iter().take(16).collect();
            format!("{}... ({} symbols)", head, self.base())
        }
    }
}

impl FromStr for Alphabet {
    type Err = CodecError;

    /// Creates an alphabet from the characters of a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars().collect())
    }
}

pub const BASE64URL_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
pub const BASE32_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
pub const BASE16_CHARS: &str = "0123456789ABCDEF";
pub const BASE10_CHARS: &str = "0123456789";
pub const BASE8_CHARS: &str = "01234567";
pub const BASE2_CHARS: &str = "01";

fn predefined(chars: &'static str) -> Alphabet {
    let chars: Vec<char> = chars.chars().collect();
    let char_to_index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
    Alphabet {
        chars,
        char_to_index,
    }
}

pub static BASE64URL: LazyLock<Alphabet> = LazyLock::new(|| predefined(BASE64URL_CHARS));
pub static BASE32: LazyLock<Alphabet> = LazyLock::new(|| predefined(BASE32_CHARS));
pub static BASE16: LazyLock<Alphabet> = LazyLock::new(|| predefined(BASE16_CHARS));
pub static BASE10: LazyLock<Alphabet> = LazyLock::new(|| predefined(BASE10_CHARS));
pub static BASE8: LazyLock<Alphabet> = LazyLock::new(|| predefined(BASE8_CHARS));
pub static BASE2: LazyLock<Alphabet> = LazyLock::new(|| predefined(BASE2_CHARS));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_alphabets() {
        assert!(matches!(
            Alphabet::new(vec![]),
            Err(CodecError::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            Alphabet::new(vec!['x']),
            Err(CodecError::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            "".parse::<Alphabet>(),
            Err(CodecError::InvalidAlphabet { .. })
        ));
        assert!(Alphabet::new(vec!['a', 'b']).is_ok());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = "0120".parse::<Alphabet>().unwrap_err();
        match err {
            CodecError::InvalidAlphabet { reason } => {
                assert!(reason.contains("'0'"));
                assert!(reason.contains("positions 0 and 3"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_digit_mapping_is_bijective() {
        let alphabet: Alphabet = "🂡🂢🂣🂤🂥".parse().unwrap();
        assert_eq!(alphabet.base(), 5);
        for digit in 0..alphabet.base() {
            let symbol = alphabet.encode_digit(digit).unwrap();
            assert_eq!(alphabet.decode_char(symbol), Some(digit));
        }
        assert_eq!(alphabet.encode_digit(5), None);
        assert_eq!(alphabet.decode_char('A'), None);
    }

    #[test]
    fn test_predefined_alphabets() {
        assert_eq!(BASE64URL.base(), 64);
        assert_eq!(BASE32.base(), 32);
        assert_eq!(BASE16.base(), 16);
        assert_eq!(BASE10.base(), 10);
        assert_eq!(BASE8.base(), 8);
        assert_eq!(BASE2.base(), 2);

        assert_eq!(BASE64URL.encode_digit(62), Some('-'));
        assert_eq!(BASE64URL.encode_digit(63), Some('_'));
        assert_eq!(BASE32.decode_char('2'), Some(26));
        assert_eq!(BASE16.decode_char('F'), Some(15));
        assert_eq!(BASE16.decode_char('f'), None);

        // The unchecked constructor must agree with the validating one
        for (alphabet, chars) in [
            (&*BASE64URL, BASE64URL_CHARS),
            (&*BASE32, BASE32_CHARS),
            (&*BASE16, BASE16_CHARS),
            (&*BASE10, BASE10_CHARS),
            (&*BASE8, BASE8_CHARS),
            (&*BASE2, BASE2_CHARS),
        ] {
            assert_eq!(alphabet, &chars.parse::<Alphabet>().unwrap());
        }
    }

    #[test]
    fn test_from_range() {
        let alphabet = Alphabet::from_range('a', 26).unwrap();
        assert_eq!(alphabet.base(), 26);
        assert_eq!(alphabet.encode_digit(25), Some('z'));

        let hangul = Alphabet::from_range('\u{AC00}', 1000).unwrap();
        assert_eq!(hangul.base(), 1000);
    }

    #[test]
    fn test_from_range_rejects_bad_ranges() {
        assert!(Alphabet::from_range('a', 1).is_err());
        assert!(Alphabet::from_range('a', 0).is_err());
        assert!(Alphabet::from_range('\u{D700}', 512).is_err());
        assert!(Alphabet::from_range('\u{10FFF0}', 32).is_err());
        assert!(Alphabet::from_range('a', usize::MAX).is_err());
    }

    #[test]
    fn test_power_of_two_and_density() {
        assert!(BASE32.is_power_of_two());
        assert!(!BASE10.is_power_of_two());
        assert_eq!(BASE16.bits_per_char(), 4.0);
    }
}
