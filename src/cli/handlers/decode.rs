use crate::cli::{
    args::DecodeArgs,
    config::{create_codec, read_input},
    global::GlobalArgs,
};
use radix_codec::AlphabetRegistry;
use std::fs;
use std::io::{self, Write};

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = create_codec(config, args.alphabet.as_deref())?;
    let input = read_input(args.file.as_deref(), global)?;
    let text =
        String::from_utf8(input).map_err(|_| "Input data is not valid UTF-8 text for decoding")?;

    // Whitespace is padding only when the alphabet does not use it as a symbol
    let text = text.trim_matches(|c: char| {
        c.is_whitespace() && codec.alphabet().decode_char(c).is_none()
    });

    let decoded = match args.length {
        Some(length) => codec.decode_to_len(text, length)?,
        None => codec.decode(text)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &decoded)?;
    } else {
        io::stdout().write_all(&decoded)?;
    }

    Ok(())
}
