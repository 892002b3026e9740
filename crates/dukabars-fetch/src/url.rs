//! Dukascopy URL construction.

use chrono::{Datelike, NaiveDate};

/// Base URL for Dukascopy data feed.
pub const BASE_URL: &str = "https://datafeed.dukascopy.com/datafeed";

/// File holding one day of one-minute BID candles.
pub const CANDLE_FILE: &str = "BID_candles_min_1.bi5";

/// Builds the URL for a specific day's minute candles.
///
/// URL format: `{BASE_URL}/{SYMBOL}/{YEAR}/{MONTH}/{DAY}/BID_candles_min_1.bi5`
///
/// Note: Dukascopy uses 0-indexed months (January = 00).
///
/// # Example
///
/// ```
/// use dukabars_fetch::url::candle_url;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let url = candle_url("eurusd", day);
/// assert_eq!(
///     url,
///     "https://datafeed.dukascopy.com/datafeed/EURUSD/2024/00/15/BID_candles_min_1.bi5"
/// );
/// ```
#[must_use]
pub fn candle_url(symbol: &str, day: NaiveDate) -> String {
    candle_url_with_base(BASE_URL, symbol, day)
}

/// Builds a candle URL against an alternative feed root.
#[must_use]
pub fn candle_url_with_base(base: &str, symbol: &str, day: NaiveDate) -> String {
    format!(
        "{}/{}/{:04}/{:02}/{:02}/{}",
        base.trim_end_matches('/'),
        symbol.to_uppercase(),
        day.year(),
        day.month0(), // Dukascopy uses 0-indexed months
        day.day(),
        CANDLE_FILE
    )
}
