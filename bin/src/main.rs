//! dukabars CLI - Dukascopy minute-candle downloader.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dukabars_lib::prelude::*;
use dukabars_lib::url::BASE_URL;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::download::SymbolSpec;

#[derive(Parser)]
#[command(name = "dukabars")]
#[command(about = "Dukascopy minute-candle downloader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download minute candles for one or more symbols
    Download {
        /// Symbols to download, optionally with a display name (EURUSD="Euro vs US Dollar")
        #[arg(required = true)]
        symbols: Vec<SymbolSpec>,

        /// First day to download (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Day after the last one to download (YYYY-MM-DD, exclusive)
        #[arg(short, long)]
        end: String,

        /// Output file path. Defaults to <symbol>.<format>, or candles.<format> for several symbols
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv, json, ndjson, parquet)
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Binary record layout of the candle files
        #[arg(long, default_value = ">IIIIIf")]
        record_format: RecordFormat,

        /// Datafeed root URL
        #[arg(long, default_value = BASE_URL)]
        base_url: String,

        /// Request timeout in seconds (transport default when omitted)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Print the candle file URL of every day in a range
    Urls {
        /// Symbol identifier (e.g., EURUSD)
        symbol: String,

        /// First day (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Day after the last one (YYYY-MM-DD, exclusive)
        #[arg(short, long)]
        end: String,

        /// Datafeed root URL
        #[arg(long, default_value = BASE_URL)]
        base_url: String,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Download {
            symbols,
            start,
            end,
            output,
            format,
            record_format,
            base_url,
            timeout,
        } => {
            let config = ClientConfig {
                base_url,
                timeout: timeout.map(std::time::Duration::from_secs),
                ..Default::default()
            };
            commands::download::download(
                &symbols,
                &start,
                &end,
                output,
                format,
                &record_format,
                config,
                cli.quiet,
            )
            .await
        }
        Commands::Urls {
            symbol,
            start,
            end,
            base_url,
        } => commands::urls::print_urls(&symbol, &start, &end, &base_url),
    }
}
