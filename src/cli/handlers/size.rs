use crate::cli::{args::SizeArgs, config::create_codec};
use radix_codec::AlphabetRegistry;

pub fn handle(args: SizeArgs, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let codec = create_codec(config, Some(&args.alphabet))?;

    if let Some(bytes) = args.bytes {
        let chars = codec
            .checked_max_char_count(bytes)
            .ok_or_else(|| format!("{} bytes need more symbols than fit in usize", bytes))?;
        println!("{} bytes -> {} symbols", bytes, chars);
    }

    if let Some(chars) = args.chars {
        let bytes = codec
            .checked_max_byte_count(chars)
            .ok_or_else(|| format!("{} symbols need more bytes than fit in usize", chars))?;
        println!("{} symbols -> {} bytes", chars, bytes);
    }

    Ok(())
}
