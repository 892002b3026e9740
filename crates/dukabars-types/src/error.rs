//! Error types for dukabars.

use chrono::NaiveDate;
use thiserror::Error;

use crate::RecordFormatError;

/// Result type alias for dukabars operations.
pub type Result<T> = std::result::Result<T, DukabarsError>;

/// Errors that can occur during data download and processing.
#[derive(Error, Debug)]
pub enum DukabarsError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a status other than success or 404.
    #[error("Unexpected status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Invalid record format descriptor.
    #[error(transparent)]
    RecordFormat(#[from] RecordFormatError),

    /// Invalid or malformed date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Symbol and display name lists differ in length.
    #[error("Got {symbols} symbols but {names} display names")]
    LengthMismatch {
        /// Number of symbols supplied.
        symbols: usize,
        /// Number of display names supplied.
        names: usize,
    },
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// Date string is not in `YYYY-MM-DD` form.
    #[error("Malformed date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),
}
