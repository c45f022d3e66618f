mod args;
mod config;
mod global;
mod handlers;

use clap::Parser;
use radix_codec::AlphabetRegistry;
use tracing_subscriber::EnvFilter;

use args::Commands;
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "radix-codec")]
#[command(version)]
#[command(about = "Encode and decode bytes in any radix, over any alphabet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.global.no_color {
        // Unsafe: environment variable access (not thread-safe); no other
        // threads exist yet
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
    }

    init_logging(&cli.global);

    // Load alphabets configuration with user overrides
    let config = AlphabetRegistry::load_with_overrides()?;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global, &config),
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &config),
        Commands::List(args) => handlers::list::handle(args, &config),
        Commands::Size(args) => handlers::size::handle(args, &config),
    }
}

/// Logs go to stderr; `RADIX_CODEC_LOG` overrides the flag-derived level.
fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_env("RADIX_CODEC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(global.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var("NO_COLOR").is_err())
        .init();
}
