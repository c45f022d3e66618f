use crate::cli::{
    args::EncodeArgs,
    config::{create_codec, read_input},
    global::GlobalArgs,
};
use radix_codec::AlphabetRegistry;
use std::fs;

pub fn handle(
    args: EncodeArgs,
    global: &GlobalArgs,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = create_codec(config, args.alphabet.as_deref())?;
    let data = read_input(args.file.as_deref(), global)?;

    let encoded = codec.encode(&data)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, encoded.as_bytes())?;
    } else {
        println!("{}", encoded);
    }

    Ok(())
}
