//! Candle record representation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-point divisor of the provider's price encoding.
pub const PRICE_DIVISOR: f64 = 1000.0;

/// Number of seconds in a calendar day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Raw candle as read from a bi5 file (before normalization).
///
/// Prices are integers scaled by [`PRICE_DIVISOR`] and the time is an offset
/// in seconds from midnight of the day the file belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Seconds since 00:00:00 of the owning day.
    pub time_offset: i64,
    /// Raw opening price.
    pub open: i64,
    /// Raw highest price.
    pub high: i64,
    /// Raw lowest price.
    pub low: i64,
    /// Raw closing price.
    pub close: i64,
    /// Volume.
    pub volume: f64,
}

impl Record {
    /// Creates a new record.
    #[must_use]
    pub const fn new(time_offset: i64, open: i64, high: i64, low: i64, close: i64, volume: f64) -> Self {
        Self {
            time_offset,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if the time offset falls inside a single day.
    #[must_use]
    pub const fn is_within_day(&self) -> bool {
        self.time_offset >= 0 && self.time_offset < SECONDS_PER_DAY
    }

    /// Normalizes the record against the day it was downloaded for.
    ///
    /// The timestamp becomes `day 00:00:00 + time_offset` seconds and every
    /// price is divided by [`PRICE_DIVISOR`], so a raw open of `123456`
    /// becomes `123.456`. Volume is passed through unchanged.
    ///
    /// Returns `None` when the offset lies outside the day.
    #[must_use]
    pub fn normalize(self, day: NaiveDate) -> Option<Row> {
        if !self.is_within_day() {
            return None;
        }

        let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
        Some(Row {
            time: midnight + TimeDelta::seconds(self.time_offset),
            open: scale(self.open),
            high: scale(self.high),
            low: scale(self.low),
            close: scale(self.close),
            volume: self.volume,
            instrument_name: None,
        })
    }
}

#[inline]
fn scale(raw: i64) -> f64 {
    raw as f64 / PRICE_DIVISOR
}

/// A normalized candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Candle open time (UTC).
    pub time: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Volume.
    pub volume: f64,
    /// Human-readable instrument name, set when rows of several symbols
    /// share one table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_name: Option<String>,
}

impl Row {
    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
