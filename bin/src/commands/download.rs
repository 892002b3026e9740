//! Download command implementation.
//!
//! This module downloads minute candles for one or more symbols and writes the
//! combined table to the chosen output format.

use crate::display::{BarProgress, write_table};
use anyhow::{Context, Result};
use dukabars_lib::prelude::*;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// A symbol with the name used to tag its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SymbolSpec {
    pub(crate) symbol: String,
    pub(crate) name: String,
}

impl FromStr for SymbolSpec {
    type Err = String;

    /// Parses `SYMBOL` or `SYMBOL=Display Name`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, name) = match s.split_once('=') {
            Some((symbol, name)) => (symbol.trim(), name.trim()),
            None => (s.trim(), s.trim()),
        };
        if symbol.is_empty() {
            return Err(format!("missing symbol in '{s}'"));
        }
        let name = if name.is_empty() { symbol } else { name };
        Ok(Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
    }
}

/// Default output path: `<symbol>.<ext>` for one symbol, `candles.<ext>` otherwise.
fn default_output(symbols: &[SymbolSpec], format: OutputFormat) -> PathBuf {
    let stem = match symbols {
        [single] => single.symbol.to_lowercase(),
        _ => "candles".to_string(),
    };
    PathBuf::from(format!("{stem}.{}", format.extension()))
}

/// Download candles for the given symbols and write them to `output`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn download(
    symbols: &[SymbolSpec],
    start: &str,
    end: &str,
    output: Option<PathBuf>,
    format: OutputFormat,
    record_format: &RecordFormat,
    config: ClientConfig,
    quiet: bool,
) -> Result<()> {
    // Validate the range before creating the client or progress bar
    let range = DateRange::parse(start, end)?;
    let output = output.unwrap_or_else(|| default_output(symbols, format));

    let client = DownloadClient::new(config).context("Failed to create HTTP client")?;
    let progress = BarProgress::new(quiet);

    let tickers: Vec<&str> = symbols.iter().map(|s| s.symbol.as_str()).collect();
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();

    let table = download_data(&client, &tickers, &names, start, end, record_format, &progress)
        .await
        .with_context(|| format!("Download failed for {range}"))?;

    progress.finish(table.len());

    write_table(&table, &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), rows = table.len(), "Wrote candle table");

    if !quiet {
        println!("Output written to: {}", output.display());
    }

    Ok(())
}
