//! Core types for the dukabars minute-candle downloader.
//!
//! This crate provides the fundamental data structures used throughout dukabars:
//!
//! - [`Record`] - A decoded candle before price and time normalization
//! - [`Row`] - A normalized candle with an absolute timestamp
//! - [`Table`] - Append-only sequence of rows, optionally tagged per instrument
//! - [`RecordFormat`] - Fixed-width binary layout descriptor
//! - [`DateRange`] - End-exclusive day range for data retrieval

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dukabars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod record;
mod record_format;
mod table;

pub use date_range::{DATE_FORMAT, DateRange, DayIterator, parse_date};
pub use error::{DateRangeError, DukabarsError, Result};
pub use record::{PRICE_DIVISOR, Record, Row, SECONDS_PER_DAY};
pub use record_format::{Endian, FieldKind, FieldSpec, RecordFormat, RecordFormatError};
pub use table::Table;
