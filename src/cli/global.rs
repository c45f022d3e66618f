use clap::Args;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Suppress warnings (errors are still reported)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(long, global = true, default_value = "104857600")]
    pub max_size: usize,

    /// Process inputs exceeding --max-size
    #[arg(long, global = true)]
    pub force: bool,
}

impl GlobalArgs {
    /// Log filter implied by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}
