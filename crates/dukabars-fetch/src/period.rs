//! Sequential day-by-day download pipeline.

use std::pin::pin;

use chrono::NaiveDate;
use dukabars_types::{DateRange, DukabarsError, RecordFormat, Result, Row, Table};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::progress::{DayOutcome, PeriodReport, ProgressObserver};
use crate::{DayFetcher, FetchError, decompress_bi5, normalize, parse_records};

/// Rows decoded from a single day.
#[derive(Debug, Clone)]
pub struct DayBatch {
    /// The day the rows belong to.
    pub day: NaiveDate,
    /// Normalized rows in time order.
    pub rows: Vec<Row>,
    /// How the day was resolved.
    pub outcome: DayOutcome,
}

impl DayBatch {
    /// Creates a batch holding decoded rows.
    #[must_use]
    pub const fn new(day: NaiveDate, rows: Vec<Row>) -> Self {
        let outcome = DayOutcome::Rows(rows.len());
        Self { day, rows, outcome }
    }

    /// Creates an empty batch for a day the provider has no file for.
    #[must_use]
    pub const fn not_found(day: NaiveDate) -> Self {
        Self {
            day,
            rows: Vec::new(),
            outcome: DayOutcome::NotFound,
        }
    }

    /// Creates an empty batch for a day whose data could not be decoded.
    #[must_use]
    pub const fn corrupt(day: NaiveDate) -> Self {
        Self {
            day,
            rows: Vec::new(),
            outcome: DayOutcome::Corrupt,
        }
    }

    /// Returns true if the batch has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Fetches, decompresses, parses and normalizes one day.
///
/// A missing file yields [`DayBatch::not_found`] and a corrupt one
/// [`DayBatch::corrupt`]; neither is an error.
///
/// # Errors
///
/// Returns an error on transport failure or an unexpected HTTP status.
pub async fn fetch_day_batch<F: DayFetcher + ?Sized>(
    fetcher: &F,
    symbol: &str,
    day: NaiveDate,
    format: &RecordFormat,
) -> std::result::Result<DayBatch, FetchError> {
    let Some(compressed) = fetcher.fetch_day(symbol, day).await? else {
        return Ok(DayBatch::not_found(day));
    };

    let decompressed = match decompress_bi5(&compressed) {
        Ok(data) => data,
        Err(e) => {
            warn!(symbol, %day, error = %e, "decompress failed, skipping day");
            return Ok(DayBatch::corrupt(day));
        }
    };

    let rows = normalize(parse_records(&decompressed, format), day);
    debug!(symbol, %day, rows = rows.len(), "decoded day");
    Ok(DayBatch::new(day, rows))
}

/// Creates a stream of day batches for `symbol` over `range`.
///
/// Days are fetched one at a time in ascending order; the next request is
/// only issued once the previous batch has been consumed.
pub fn day_stream<'a, F: DayFetcher + ?Sized>(
    fetcher: &'a F,
    symbol: &'a str,
    range: DateRange,
    format: &'a RecordFormat,
) -> impl Stream<Item = std::result::Result<DayBatch, FetchError>> + 'a {
    stream::iter(range.days()).then(move |day| fetch_day_batch(fetcher, symbol, day, format))
}

/// Downloads every day of `range` for `symbol`, appending rows to `table`.
///
/// This is the accumulator form of [`download_period`]: rows are appended in
/// place so repeated calls never copy what is already in the table.
///
/// # Errors
///
/// Returns the first transport error. Rows from days before the failure
/// remain in `table`.
pub async fn download_period_into<F: DayFetcher + ?Sized>(
    fetcher: &F,
    symbol: &str,
    range: DateRange,
    format: &RecordFormat,
    table: &mut Table,
    progress: &dyn ProgressObserver,
) -> std::result::Result<PeriodReport, FetchError> {
    let mut report = PeriodReport::default();
    let mut days = pin!(day_stream(fetcher, symbol, range, format));

    while let Some(batch) = days.next().await {
        let batch = batch?;
        report.record(batch.outcome);
        progress.on_day(symbol, batch.day, batch.outcome);
        table.extend(batch.rows);
    }

    Ok(report)
}

/// Downloads `symbol` for every day in `[start_day, end_day)`.
///
/// Dates must be `YYYY-MM-DD`; a malformed date fails before any request is
/// made. Days without data contribute no rows.
///
/// # Errors
///
/// Returns an error if a date is malformed or a request fails.
pub async fn download_period<F: DayFetcher + ?Sized>(
    fetcher: &F,
    symbol: &str,
    start_day: &str,
    end_day: &str,
    format: &RecordFormat,
    progress: &dyn ProgressObserver,
) -> Result<Table> {
    let range = DateRange::parse(start_day, end_day)?;
    let mut table = Table::new();

    progress.on_symbol_start(symbol, symbol, range.total_days());
    let report = download_period_into(fetcher, symbol, range, format, &mut table, progress)
        .await?;
    progress.on_symbol_finish(symbol, &report);

    Ok(table)
}

/// Downloads several symbols over the same period into one table.
///
/// `symbols` and `display_names` are paired in order. Each symbol's rows are
/// tagged with its display name and appended as one block, so blocks follow
/// the input order and rows within a block are chronological.
///
/// # Errors
///
/// Returns an error if the lists differ in length, a date is malformed, or a
/// request fails.
pub async fn download_data<F, S, N>(
    fetcher: &F,
    symbols: &[S],
    display_names: &[N],
    start_day: &str,
    end_day: &str,
    format: &RecordFormat,
    progress: &dyn ProgressObserver,
) -> Result<Table>
where
    F: DayFetcher + ?Sized,
    S: AsRef<str>,
    N: AsRef<str>,
{
    if symbols.len() != display_names.len() {
        return Err(DukabarsError::LengthMismatch {
            symbols: symbols.len(),
            names: display_names.len(),
        });
    }

    let range = DateRange::parse(start_day, end_day)?;
    let mut table = Table::new();

    for (symbol, name) in symbols.iter().zip(display_names) {
        let (symbol, name) = (symbol.as_ref(), name.as_ref());
        info!(symbol, "Downloading {name} data");
        progress.on_symbol_start(symbol, name, range.total_days());

        let mut block = Table::new();
        let report = download_period_into(fetcher, symbol, range, format, &mut block, progress)
            .await?;
        block.tag(name);
        table.append(block);

        progress.on_symbol_finish(symbol, &report);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoProgress;
    use async_trait::async_trait;
    use bytes::Bytes;
    use dukabars_types::DateRangeError;
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Response {
        Body(Bytes),
        Missing,
        Fail(u16),
    }

    /// In-memory fetcher. Days without an entry are reported as missing.
    #[derive(Default)]
    struct MockFetcher {
        responses: HashMap<(String, NaiveDate), Response>,
        calls: AtomicUsize,
    }

    impl MockFetcher {
        fn with(mut self, symbol: &str, day: NaiveDate, response: Response) -> Self {
            self.responses.insert((symbol.to_string(), day), response);
            self
        }
    }

    #[async_trait]
    impl DayFetcher for MockFetcher {
        async fn fetch_day(
            &self,
            symbol: &str,
            day: NaiveDate,
        ) -> std::result::Result<Option<Bytes>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(&(symbol.to_string(), day)) {
                Some(Response::Body(bytes)) => Ok(Some(bytes.clone())),
                Some(Response::Missing) | None => Ok(None),
                Some(Response::Fail(status)) => Err(FetchError::Status {
                    status: *status,
                    url: format!("mock://{symbol}/{day}"),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_symbol_start(&self, symbol: &str, name: &str, total_days: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {symbol} {name} {total_days}"));
        }

        fn on_day(&self, symbol: &str, day: NaiveDate, outcome: DayOutcome) {
            self.events
                .lock()
                .unwrap()
                .push(format!("day {symbol} {day} {outcome:?}"));
        }

        fn on_symbol_finish(&self, symbol: &str, report: &PeriodReport) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finish {symbol} {}", report.rows));
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Compressed candle file with one record per offset; prices encode `base`.
    fn bi5(offsets: &[u32], base: u32) -> Response {
        let mut raw = Vec::new();
        for &offset in offsets {
            raw.extend_from_slice(&offset.to_be_bytes());
            for price in [base, base + 10, base - 10, base + 5] {
                raw.extend_from_slice(&price.to_be_bytes());
            }
            raw.extend_from_slice(&1.0f32.to_be_bytes());
        }
        let mut compressed = Vec::new();
        lzma_rs::lzma_compress(&mut Cursor::new(raw), &mut compressed).unwrap();
        Response::Body(Bytes::from(compressed))
    }

    #[tokio::test]
    async fn test_period_rows_in_day_order() {
        let fetcher = MockFetcher::default()
            .with("EURUSD", date(2024, 1, 1), bi5(&[0, 60], 108_000))
            .with("EURUSD", date(2024, 1, 2), bi5(&[0], 108_100));

        let table = download_period(
            &fetcher,
            "EURUSD",
            "2024-01-01",
            "2024-01-03",
            &RecordFormat::candles(),
            &NoProgress,
        )
        .await
        .unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.rows().windows(2).all(|w| w[0].time < w[1].time));
        assert!((table.rows()[2].open - 108.1).abs() < 1e-9);
        assert!(!table.has_instrument_names());
    }

    #[tokio::test]
    async fn test_not_found_day_is_skipped() {
        let fetcher = MockFetcher::default()
            .with("EURUSD", date(2024, 1, 1), bi5(&[0], 108_000))
            .with("EURUSD", date(2024, 1, 2), Response::Missing)
            .with("EURUSD", date(2024, 1, 3), bi5(&[0], 108_200));

        let table = download_period(
            &fetcher,
            "EURUSD",
            "2024-01-01",
            "2024-01-04",
            &RecordFormat::candles(),
            &NoProgress,
        )
        .await
        .unwrap();

        let days: Vec<_> = table.iter().map(|r| r.time.date_naive()).collect();
        assert_eq!(days, vec![date(2024, 1, 1), date(2024, 1, 3)]);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_corrupt_day_is_skipped() {
        let fetcher = MockFetcher::default()
            .with(
                "EURUSD",
                date(2024, 1, 1),
                Response::Body(Bytes::from_static(&[0x00, 0x01, 0x02, 0x03])),
            )
            .with("EURUSD", date(2024, 1, 2), bi5(&[120], 108_000));

        let mut table = Table::new();
        let range = DateRange::parse("2024-01-01", "2024-01-03").unwrap();
        let report = download_period_into(
            &fetcher,
            "EURUSD",
            range,
            &RecordFormat::candles(),
            &mut table,
            &NoProgress,
        )
        .await
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(
            report,
            PeriodReport {
                days: 2,
                rows: 1,
                not_found: 0,
                corrupt: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_body_yields_no_rows() {
        let fetcher = MockFetcher::default().with(
            "EURUSD",
            date(2024, 1, 1),
            Response::Body(Bytes::new()),
        );

        let batch = fetch_day_batch(&fetcher, "EURUSD", date(2024, 1, 1), &RecordFormat::candles())
            .await
            .unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.outcome, DayOutcome::Rows(0));
    }

    #[tokio::test]
    async fn test_day_batch_counts_rows() {
        let fetcher =
            MockFetcher::default().with("EURUSD", date(2024, 1, 1), bi5(&[0, 60, 120], 108_000));

        let batch = fetch_day_batch(&fetcher, "EURUSD", date(2024, 1, 1), &RecordFormat::candles())
            .await
            .unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.outcome, DayOutcome::Rows(batch.len()));
    }

    #[tokio::test]
    async fn test_status_error_aborts() {
        let fetcher = MockFetcher::default()
            .with("EURUSD", date(2024, 1, 1), Response::Fail(500))
            .with("EURUSD", date(2024, 1, 2), bi5(&[0], 108_000));

        let result = download_period(
            &fetcher,
            "EURUSD",
            "2024-01-01",
            "2024-01-03",
            &RecordFormat::candles(),
            &NoProgress,
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DukabarsError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "Unexpected status 500 for mock://EURUSD/2024-01-01");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_date_fails_fast() {
        let fetcher = MockFetcher::default();

        let result = download_period(
            &fetcher,
            "EURUSD",
            "2024/01/01",
            "2024-01-03",
            &RecordFormat::candles(),
            &NoProgress,
        )
        .await;

        assert!(matches!(
            result,
            Err(DukabarsError::DateRange(DateRangeError::MalformedDate(_)))
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_multi_symbol_blocks_follow_input_order() {
        let fetcher = MockFetcher::default()
            .with("A", date(2024, 1, 1), bi5(&[0, 60], 1_000))
            .with("A", date(2024, 1, 2), bi5(&[0], 1_100))
            .with("B", date(2024, 1, 1), bi5(&[30], 2_000))
            .with("B", date(2024, 1, 2), Response::Missing);

        let table = download_data(
            &fetcher,
            &["A", "B"],
            &["Alpha", "Beta"],
            "2024-01-01",
            "2024-01-03",
            &RecordFormat::candles(),
            &NoProgress,
        )
        .await
        .unwrap();

        let blocks: Vec<_> = table.blocks().map(|(name, rows)| (name, rows.len())).collect();
        assert_eq!(blocks, vec![(Some("Alpha"), 3), (Some("Beta"), 1)]);

        for (_, rows) in table.blocks() {
            assert!(rows.windows(2).all(|w| w[0].time < w[1].time));
        }
    }

    #[tokio::test]
    async fn test_length_mismatch() {
        let fetcher = MockFetcher::default();
        let result = download_data(
            &fetcher,
            &["A", "B"],
            &["Alpha"],
            "2024-01-01",
            "2024-01-02",
            &RecordFormat::candles(),
            &NoProgress,
        )
        .await;

        assert!(matches!(
            result,
            Err(DukabarsError::LengthMismatch {
                symbols: 2,
                names: 1
            })
        ));
    }

    #[tokio::test]
    async fn test_progress_events() {
        let fetcher = MockFetcher::default().with("A", date(2024, 1, 1), bi5(&[0], 1_000));
        let observer = RecordingObserver::default();

        download_data(
            &fetcher,
            &["A"],
            &["Alpha"],
            "2024-01-01",
            "2024-01-03",
            &RecordFormat::candles(),
            &observer,
        )
        .await
        .unwrap();

        let events = observer.events.into_inner().unwrap();
        assert_eq!(
            events,
            vec![
                "start A Alpha 2".to_string(),
                "day A 2024-01-01 Rows(1)".to_string(),
                "day A 2024-01-02 NotFound".to_string(),
                "finish A 1".to_string(),
            ]
        );
    }
}
