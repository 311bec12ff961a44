use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reachprobe")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Probe an HTTP endpoint once and explain why it is or is not reachable")]
pub struct Cli {
    /// URL to probe (defaults to target_url from the config)
    pub url: Option<String>,

    /// Timeout in seconds for the whole exchange
    #[arg(short = 't', long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the report as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Use this config file instead of ~/.reachprobe/config.toml
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a default config file
    #[arg(long = "init")]
    pub init: bool,

    /// Print the effective configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Validate the configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
