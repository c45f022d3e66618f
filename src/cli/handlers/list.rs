use crate::cli::args::ListArgs;
use radix_codec::AlphabetRegistry;
use tracing::warn;

pub fn handle(args: ListArgs, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows = Vec::new();
    for name in config.names() {
        // Entries that do not build are listed as invalid rather than aborting
        let codec = config
            .build_codec(&name)
            .inspect_err(|e| warn!(alphabet = %name, error = %e, "skipping invalid alphabet"))
            .ok();
        rows.push((name, codec));
    }

    if args.json {
        let entries: Vec<serde_json::Value> = rows
            .iter()
            .map(|(name, codec)| match codec {
                Some(codec) => serde_json::json!({
                    "name": name,
                    "base": codec.base(),
                    "bits_per_char": codec.alphabet().bits_per_char(),
                    "preserves_length": codec.preserves_length(),
                    "description": config.get_alphabet(name).and_then(|c| c.description.clone()),
                }),
                None => serde_json::json!({ "name": name, "valid": false }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Available alphabets:\n");
    for (name, codec) in &rows {
        let Some(codec) = codec else {
            println!("  {:<12} (invalid)", name);
            continue;
        };

        let preview: String = codec.alphabet().chars().iter().take(20).collect();
        let suffix = if codec.base() > 20 { "..." } else { "" };
        let length = if codec.preserves_length() { "exact" } else { "pad" };
        println!(
            "  {:<12} base-{:<5} {:>5.2} bits  {:<5}  {}{}",
            name,
            codec.base(),
            codec.alphabet().bits_per_char(),
            length,
            preview,
            suffix
        );
    }

    Ok(())
}
