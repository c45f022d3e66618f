use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode bytes as text
    Encode(EncodeArgs),
    /// Decode text back to bytes
    Decode(DecodeArgs),
    /// List available alphabets
    List(ListArgs),
    /// Show output sizes for an alphabet
    Size(SizeArgs),
}

/// Arguments for encoding data
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Alphabet to encode with (default: settings.default_alphabet)
    #[arg(short = 'a', long)]
    pub alphabet: Option<String>,

    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for decoding data
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Alphabet to decode from (default: settings.default_alphabet)
    #[arg(short = 'a', long)]
    pub alphabet: Option<String>,

    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Emit exactly this many bytes instead of the length implied by the input
    #[arg(short = 'l', long, value_name = "BYTES")]
    pub length: Option<usize>,
}

/// Arguments for listing alphabets
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the size calculator
#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("count")
        .required(true)
        .multiple(true)
        .args(["bytes", "chars"])
))]
pub struct SizeArgs {
    /// Alphabet to size for
    pub alphabet: String,

    /// Symbols needed to encode this many bytes
    #[arg(long, value_name = "N")]
    pub bytes: Option<usize>,

    /// Bytes produced by decoding this many symbols
    #[arg(long, value_name = "N")]
    pub chars: Option<usize>,
}
