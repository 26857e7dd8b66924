use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pingcheck")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Concurrent HTTP(S) reachability checker with HEAD/GET fallback")]
pub struct Cli {
    /// Hosts or URLs to check instead of the configured endpoints
    #[arg(value_name = "LOCATOR")]
    pub locators: Vec<String>,

    /// Config file (default: ~/.pingcheck/config.toml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Write the default config file
    #[arg(long = "init")]
    pub init: bool,

    /// Print the effective config
    #[arg(long = "print")]
    pub print: bool,

    /// Validate the config file
    #[arg(long = "check")]
    pub check: bool,

    /// Per-attempt timeout override in milliseconds
    #[arg(short = 't', long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print the final status map as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Print every status change as it happens
    #[arg(short = 'w', long = "watch")]
    pub watch: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
