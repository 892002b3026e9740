//! Rust library for downloading Dukascopy minute candles.
//!
//! This is a facade crate that re-exports functionality from the dukabars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use dukabars_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DownloadClient::with_defaults()?;
//!
//!     let table = download_data(
//!         &client,
//!         &["EURUSD", "GBPUSD"],
//!         &["Euro vs US Dollar", "Pound vs US Dollar"],
//!         "2024-01-01",
//!         "2024-01-08",
//!         &RecordFormat::candles(),
//!         &NoProgress,
//!     )
//!     .await?;
//!
//!     println!("Downloaded {} candles", table.len());
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dukabars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use dukabars_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use dukabars_fetch::{
    ClientConfig, DayBatch, DayFetcher, DayOutcome, DecompressError, DownloadClient, FetchError,
    NoProgress, PeriodReport, ProgressObserver, decompress_bi5, download_data, download_period,
    download_period_into, normalize, parse_records, url,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use dukabars_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use dukabars_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use dukabars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use dukabars_types::{
        DateRange, DateRangeError, DukabarsError, Record, RecordFormat, Result, Row, Table,
    };

    #[cfg(feature = "fetch")]
    pub use dukabars_fetch::{
        ClientConfig, DayFetcher, DayOutcome, DownloadClient, NoProgress, PeriodReport,
        ProgressObserver, download_data, download_period,
    };

    #[cfg(feature = "format")]
    pub use dukabars_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use dukabars_format::ParquetFormatter;
}
