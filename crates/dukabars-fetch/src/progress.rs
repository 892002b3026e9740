//! Progress reporting hooks for the download pipeline.

use chrono::NaiveDate;

/// What happened to a single day of a period download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// The day was decoded into this many rows.
    Rows(usize),
    /// The provider has no file for the day.
    NotFound,
    /// The file could not be decompressed and the day was skipped.
    Corrupt,
}

/// Per-symbol summary of a period download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodReport {
    /// Days processed.
    pub days: usize,
    /// Rows appended.
    pub rows: usize,
    /// Days the provider had no file for.
    pub not_found: usize,
    /// Days skipped because of corrupt data.
    pub corrupt: usize,
}

impl PeriodReport {
    /// Accounts for one day's outcome.
    pub const fn record(&mut self, outcome: DayOutcome) {
        self.days += 1;
        match outcome {
            DayOutcome::Rows(n) => self.rows += n,
            DayOutcome::NotFound => self.not_found += 1,
            DayOutcome::Corrupt => self.corrupt += 1,
        }
    }
}

/// Observer notified as the pipeline advances.
///
/// All methods default to doing nothing.
pub trait ProgressObserver: Send + Sync {
    /// A symbol's period download is starting.
    fn on_symbol_start(&self, _symbol: &str, _name: &str, _total_days: usize) {}

    /// A day has been processed.
    fn on_day(&self, _symbol: &str, _day: NaiveDate, _outcome: DayOutcome) {}

    /// A symbol's period download finished.
    fn on_symbol_finish(&self, _symbol: &str, _report: &PeriodReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
