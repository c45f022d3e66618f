//! Arbitrary-radix text codec.
//!
//! Converts byte buffers to strings over any alphabet of two or more symbols
//! and back, by treating the whole buffer as one unsigned integer. Output
//! lengths are a fixed function of input length and base; see
//! [`RadixCodec`] for the exact contract.
//!
//! ```
//! use radix_codec::RadixCodec;
//!
//! let hex = RadixCodec::base16();
//! assert_eq!(hex.encode(&[0x01, 0x02]).unwrap(), "0201");
//! assert_eq!(hex.decode("0201").unwrap(), vec![0x01, 0x02]);
//!
//! let dna: RadixCodec = "ACGT".parse().unwrap();
//! assert_eq!(dna.encode(b"\x1b").unwrap(), "ACGT");
//! ```

mod alphabet;
mod codec;
mod config;
mod errors;
pub mod prelude;
pub mod sizing;

pub use alphabet::{
    Alphabet, BASE2, BASE2_CHARS, BASE8, BASE8_CHARS, BASE10, BASE10_CHARS, BASE16, BASE16_CHARS,
    BASE32, BASE32_CHARS, BASE64URL, BASE64URL_CHARS,
};
pub use codec::{RadixCodec, magnitude};
pub use config::{AlphabetConfig, AlphabetRegistry, Settings, find_closest_alphabet};
pub use errors::{AlphabetNotFoundError, CodecError};
pub use num_bigint::BigUint;
pub use sizing::SizeModel;

/// Encodes `data` with `codec`. See [`RadixCodec::encode`].
pub fn encode(data: &[u8], codec: &RadixCodec) -> Result<String, CodecError> {
    codec.encode(data)
}

/// Decodes `encoded` with `codec`. See [`RadixCodec::decode`].
pub fn decode(encoded: &str, codec: &RadixCodec) -> Result<Vec<u8>, CodecError> {
    codec.decode(encoded)
}
