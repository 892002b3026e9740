//! HTTP client and data fetching for the dukabars candle downloader.
//!
//! This crate provides the data download pipeline:
//!
//! - [`url::candle_url`] - Constructs Dukascopy data URLs
//! - [`DownloadClient`] - HTTP client, one GET per day
//! - [`decompress_bi5`] - LZMA/XZ decompression with container detection
//! - [`parse_records`] - Fixed-width binary record parsing
//! - [`normalize`] - Timestamp and price normalization
//! - [`download_period`] / [`download_data`] - Sequential period and
//!   multi-symbol downloads into a [`Table`](dukabars_types::Table)

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dukabars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decompress;
mod normalize;
mod parse;
mod period;
mod progress;
pub mod url;

pub use client::{ClientConfig, DayFetcher, DownloadClient, FetchError};
pub use decompress::{Container, DecompressError, XZ_MAGIC, decompress_bi5};
pub use normalize::normalize;
pub use parse::{parse_records, record_count, trailing_bytes};
pub use period::{
    DayBatch, day_stream, download_data, download_period, download_period_into, fetch_day_batch,
};
pub use progress::{DayOutcome, NoProgress, PeriodReport, ProgressObserver};
