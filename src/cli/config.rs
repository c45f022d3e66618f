use crate::cli::global::GlobalArgs;
use radix_codec::{AlphabetRegistry, RadixCodec};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Builds the codec for `name`, falling back to the configured default.
pub fn create_codec(
    config: &AlphabetRegistry,
    name: Option<&str>,
) -> Result<RadixCodec, Box<dyn std::error::Error>> {
    let name = name
        .or(config.settings.default_alphabet.as_deref())
        .ok_or("No alphabet given. Use --alphabet or set settings.default_alphabet")?;

    let codec = config.build_codec(name)?;
    debug!(alphabet = name, base = codec.base(), "selected alphabet");
    Ok(codec)
}

/// Reads the whole input from `file` or stdin, enforcing `--max-size`.
pub fn read_input(
    file: Option<&Path>,
    global: &GlobalArgs,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let Some(file_path) = file else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        check_size(buffer.len(), "Input", global)?;
        return Ok(buffer);
    };

    check_size(fs::metadata(file_path)?.len() as usize, "File", global)?;
    Ok(fs::read(file_path)?)
}

/// Rejects inputs over `--max-size` unless `--force` is set, warning when forced.
fn check_size(
    size: usize,
    source: &str,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if global.max_size == 0 || size <= global.max_size {
        return Ok(());
    }

    if !global.force {
        return Err(format!(
            "{} size ({} bytes) exceeds maximum ({} bytes). Use --force to process anyway.",
            source, size, global.max_size
        )
        .into());
    }

    warn!(
        size,
        limit = global.max_size,
        "processing large input; conversion cost grows superlinearly"
    );
    Ok(())
}
