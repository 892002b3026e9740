//! Per-day record normalization.

use chrono::NaiveDate;
use dukabars_types::{Record, Row};
use tracing::warn;

/// Normalizes one day's records into rows.
///
/// Each record's time offset is added to midnight of `day` and prices are
/// divided by the fixed-point divisor. Records whose offset does not fall
/// inside the day are dropped with a warning.
pub fn normalize(records: impl IntoIterator<Item = Record>, day: NaiveDate) -> Vec<Row> {
    let mut dropped = 0usize;
    let rows: Vec<Row> = records
        .into_iter()
        .filter_map(|record| {
            let row = record.normalize(day);
            if row.is_none() {
                dropped += 1;
            }
            row
        })
        .collect();

    if dropped > 0 {
        warn!(%day, dropped, "discarded records with time offsets outside the day");
    }

    rows
}
