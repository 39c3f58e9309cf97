//! CLI application turning Deutsche Bahn ticket PDFs into a CSV table.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract};

/// DB ticket PDFs -> CSV (date / price / origin / destination)
#[derive(Parser)]
#[command(name = "tix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    init_config: Option<PathBuf>,

    /// Overwrite an existing file with --init-config
    #[arg(long, requires = "init_config")]
    force: bool,

    #[command(flatten)]
    extract: extract::ExtractArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = &cli.init_config {
        return config::init(path, cli.force);
    }

    extract::run(cli.extract, cli.config.as_deref())
}
