//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use radix_codec::prelude::*;
//!
//! let registry = AlphabetRegistry::load_default().unwrap();
//! let codec = registry.build_codec("base58").unwrap();
//! let encoded = encode(b"Hello", &codec).unwrap();
//! assert_eq!(decode(&encoded, &codec).unwrap()[..5], *b"Hello");
//! ```

pub use crate::{
    Alphabet,
    // Config
    AlphabetRegistry,
    // Errors
    CodecError,
    // Core encoding/decoding
    RadixCodec,
    SizeModel,
    decode,
    encode,
    magnitude,
};
