//! Dry-run listing of candle file URLs.

use anyhow::Result;
use dukabars_lib::DateRange;
use dukabars_lib::url::candle_url_with_base;

/// Prints one URL per day in `[start, end)` without touching the network.
pub(crate) fn print_urls(symbol: &str, start: &str, end: &str, base_url: &str) -> Result<()> {
    let range = DateRange::parse(start, end)?;
    for day in range.days() {
        println!("{}", candle_url_with_base(base_url, symbol, day));
    }
    Ok(())
}
