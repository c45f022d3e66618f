use crate::alphabet::{Alphabet, BASE2, BASE8, BASE10, BASE16, BASE32, BASE64URL};
use crate::errors::CodecError;
use crate::sizing::SizeModel;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, error, trace};

/// Fixed-length positional codec between byte buffers and strings over an
/// arbitrary alphabet.
///
/// A buffer is read as one unsigned little-endian integer and written out in
/// base `alphabet.base()`, most significant symbol first. Output length
/// depends only on input length and base:
///
/// - `encode` of `n` bytes yields exactly `max_char_count(n)` symbols
/// - `decode` of `c` symbols yields exactly `max_byte_count(c)` bytes
///
/// For bases `2^b` with `b` dividing 8 (2, 4, 16, 256) these compose to the
/// identity on lengths, so `decode(encode(x)) == x`. For every other base
/// the composed length can be larger: the value survives, followed by zero
/// padding bytes. Use [`RadixCodec::decode_to_len`] when the original length
/// is known.
///
/// Codecs are immutable and can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct RadixCodec {
    alphabet: Alphabet,
    sizing: SizeModel,
    /// `base^digits_per_chunk`, the largest power of the base that fits a u64.
    chunk: u64,
    digits_per_chunk: usize,
}

impl RadixCodec {
    pub fn new(alphabet: Alphabet) -> Self {
        let base = alphabet.base() as u64;
        let mut chunk = base;
        let mut digits_per_chunk = 1;
        while let Some(next) = chunk.checked_mul(base) {
            chunk = next;
            digits_per_chunk += 1;
        }

        debug!(base, digits_per_chunk, "built radix codec");

        RadixCodec {
            sizing: SizeModel::new(alphabet.base()),
            alphabet,
            chunk,
            digits_per_chunk,
        }
    }

    /// Builds a codec over the characters of `chars`, in digit order.
    pub fn from_chars(chars: &str) -> Result<Self, CodecError> {
        Ok(Self::new(Alphabet::from_str(chars)?))
    }

    pub fn base64url() -> &'static RadixCodec {
        &BASE64URL_CODEC
    }

    pub fn base32() -> &'static RadixCodec {
        &BASE32_CODEC
    }

    pub fn base16() -> &'static RadixCodec {
        &BASE16_CODEC
    }

    pub fn base10() -> &'static RadixCodec {
        &BASE10_CODEC
    }

    pub fn base8() -> &'static RadixCodec {
        &BASE8_CODEC
    }

    pub fn base2() -> &'static RadixCodec {
        &BASE2_CODEC
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn base(&self) -> usize {
        self.alphabet.base()
    }

    pub fn sizing(&self) -> &SizeModel {
        &self.sizing
    }

    /// Whether `decode(encode(x))` reproduces `x` byte for byte at every length.
    pub fn preserves_length(&self) -> bool {
        self.sizing.preserves_length()
    }

    /// Symbols produced for a `byte_count`-byte buffer.
    ///
    /// # Panics
    ///
    /// Panics if the count overflows `usize`.
    pub fn max_char_count(&self, byte_count: usize) -> usize {
        self.sizing.max_char_count(byte_count)
    }

    /// Bytes produced for a `char_count`-symbol string.
    ///
    /// # Panics
    ///
    /// Panics if the count overflows `usize`.
    pub fn max_byte_count(&self, char_count: usize) -> usize {
        self.sizing.max_byte_count(char_count)
    }

    pub fn checked_max_char_count(&self, byte_count: usize) -> Option<usize> {
        self.sizing.checked_max_char_count(byte_count)
    }

    pub fn checked_max_byte_count(&self, char_count: usize) -> Option<usize> {
        self.sizing.checked_max_byte_count(char_count)
    }

    /// Encodes `data` as exactly `max_char_count(data.len())` symbols.
    ///
    /// # Errors
    ///
    /// - [`CodecError::LengthOverflow`] if the symbol count does not fit in
    ///   `usize`
    /// - [`CodecError::CapacityOverflow`] if the magnitude outgrows it; this
    ///   indicates a sizing bug
    pub fn encode(&self, data: &[u8]) -> Result<String, CodecError> {
        let char_count = self.output_char_count(data.len())?;

        trace!(bytes = data.len(), chars = char_count, "encode");

        let base = self.base() as u64;
        let chunk = BigUint::from(self.chunk);
        let mut num = magnitude(data);

        // Least significant digit first
        let mut digits = Vec::with_capacity(char_count);
        while digits.len() < char_count {
            let (quotient, remainder) = num.div_rem(&chunk);
            let mut rem = remainder.to_u64().unwrap_or_default();

            let take = self.digits_per_chunk.min(char_count - digits.len());
            for _ in 0..take {
                digits.push((rem % base) as usize);
                rem /= base;
            }

            if rem != 0 {
                return Err(self.encode_overflow(data, char_count));
            }
            num = quotient;
        }

        if !num.is_zero() {
            return Err(self.encode_overflow(data, char_count));
        }

        digits
            .iter()
            .rev()
            .map(|&digit| {
                self.alphabet
                    .encode_digit(digit)
                    .ok_or_else(|| self.encode_overflow(data, char_count))
            })
            .collect()
    }

    /// Decodes `encoded` into exactly `max_byte_count(symbols)` bytes,
    /// little-endian, zero-padded at the high end.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidSymbol`] for a symbol outside the alphabet
    /// - [`CodecError::LengthOverflow`] if the byte count does not fit in `usize`
    /// - [`CodecError::CapacityOverflow`] if the value outgrows the computed
    ///   length; this indicates a sizing bug and is never truncated away
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>, CodecError> {
        let char_count = encoded.chars().count();
        let byte_count = self.output_byte_count(char_count)?;

        trace!(chars = char_count, bytes = byte_count, "decode");

        let num = self.parse_magnitude(encoded)?;
        to_le_bytes(&num, byte_count).inspect_err(|err| {
            error!(base = self.base(), chars = char_count, %err, "decoded value outgrew its computed length");
        })
    }

    fn output_char_count(&self, byte_count: usize) -> Result<usize, CodecError> {
        self.checked_max_char_count(byte_count)
            .ok_or_else(|| CodecError::length_overflow(byte_count, "bytes"))
    }

    fn output_byte_count(&self, char_count: usize) -> Result<usize, CodecError> {
        self.checked_max_byte_count(char_count)
            .ok_or_else(|| CodecError::length_overflow(char_count, "symbols"))
    }

    /// Decodes `encoded` into exactly `byte_count` bytes.
    ///
    /// Recovers the original length for bases where [`RadixCodec::decode`]
    /// pads, provided the caller knows it.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidSymbol`] for a symbol outside the alphabet
    /// - [`CodecError::CapacityOverflow`] if the value needs more than
    ///   `byte_count` bytes
    pub fn decode_to_len(&self, encoded: &str, byte_count: usize) -> Result<Vec<u8>, CodecError> {
        let num = self.parse_magnitude(encoded)?;
        to_le_bytes(&num, byte_count)
    }

    /// Horner evaluation of `encoded`, most significant symbol first, folding
    /// up to `digits_per_chunk` symbols into a machine word per big multiply.
    fn parse_magnitude(&self, encoded: &str) -> Result<BigUint, CodecError> {
        let base = self.base() as u64;
        let mut num = BigUint::zero();
        let mut pending: u64 = 0;
        let mut pending_scale: u64 = 1;
        let mut pending_digits = 0;

        for (position, (byte_offset, c)) in encoded.char_indices().enumerate() {
            let digit = self.alphabet.decode_char(c).ok_or_else(|| {
                CodecError::invalid_symbol(
                    c,
                    position,
                    byte_offset,
                    encoded,
                    &self.alphabet.describe_symbols(),
                )
            })?;

            pending = pending * base + digit as u64;
            pending_scale *= base;
            pending_digits += 1;

            if pending_digits == self.digits_per_chunk {
                num = num * pending_scale + pending;
                pending = 0;
                pending_scale = 1;
                pending_digits = 0;
            }
        }

        if pending_digits > 0 {
            num = num * pending_scale + pending;
        }
        Ok(num)
    }

    fn encode_overflow(&self, data: &[u8], capacity: usize) -> CodecError {
        let required = self.digit_count(&magnitude(data));
        error!(
            base = self.base(),
            bytes = data.len(),
            required,
            capacity,
            "encoded value outgrew its computed length"
        );
        CodecError::capacity_overflow(required, capacity)
    }

    /// Number of base-`base` digits in `num` (0 for zero).
    fn digit_count(&self, num: &BigUint) -> usize {
        let chunk = BigUint::from(self.chunk);
        let base = self.base() as u64;
        let mut num = num.clone();
        let mut count = 0;
        while num >= chunk {
            num /= &chunk;
            count += self.digits_per_chunk;
        }
        let mut top = num.to_u64().unwrap_or_default();
        while top > 0 {
            top /= base;
            count += 1;
        }
        count
    }
}

impl FromStr for RadixCodec {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_chars(s)
    }
}

/// The unsigned little-endian value of `data`: `sum(data[i] * 256^i)`.
pub fn magnitude(data: &[u8]) -> BigUint {
    BigUint::from_bytes_le(data)
}

/// Serializes `num` little-endian into exactly `byte_count` bytes.
fn to_le_bytes(num: &BigUint, byte_count: usize) -> Result<Vec<u8>, CodecError> {
    let required = num.bits().div_ceil(8) as usize;
    if required > byte_count {
        return Err(CodecError::capacity_overflow(required, byte_count));
    }

    let mut bytes = if num.is_zero() {
        Vec::with_capacity(byte_count)
    } else {
        num.to_bytes_le()
    };
    bytes.resize(byte_count, 0);
    Ok(bytes)
}

static BASE64URL_CODEC: LazyLock<RadixCodec> =
    LazyLock::new(|| RadixCodec::new(BASE64URL.clone()));
static BASE32_CODEC: LazyLock<RadixCodec> = LazyLock::new(|| RadixCodec::new(BASE32.clone()));
static BASE16_CODEC: LazyLock<RadixCodec> = LazyLock::new(|| RadixCodec::new(BASE16.clone()));
static BASE10_CODEC: LazyLock<RadixCodec> = LazyLock::new(|| RadixCodec::new(BASE10.clone()));
static BASE8_CODEC: LazyLock<RadixCodec> = LazyLock::new(|| RadixCodec::new(BASE8.clone()));
static BASE2_CODEC: LazyLock<RadixCodec> = LazyLock::new(|| RadixCodec::new(BASE2.clone()));
