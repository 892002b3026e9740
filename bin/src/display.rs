//! Display utilities and output writing for the dukabars CLI.

use anyhow::Result;
use chrono::NaiveDate;
use dukabars_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Progress bar tracking days of the symbol currently downloading.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Creates a visible bar, or a hidden one in quiet mode.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} days ({percent}%) {msg}",
            ) {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        };
        Self { bar }
    }

    /// Finishes the bar with a total row count.
    pub(crate) fn finish(&self, rows: usize) {
        self.bar
            .finish_with_message(format!("Downloaded {rows} candles"));
    }
}

impl ProgressObserver for BarProgress {
    fn on_symbol_start(&self, _symbol: &str, name: &str, total_days: usize) {
        self.bar.reset();
        self.bar.set_length(total_days as u64);
        self.bar.set_message(name.to_string());
    }

    fn on_day(&self, _symbol: &str, _day: NaiveDate, _outcome: DayOutcome) {
        self.bar.inc(1);
    }

    fn on_symbol_finish(&self, symbol: &str, report: &PeriodReport) {
        let mut line = format!("{symbol}: {} candles over {} days", report.rows, report.days);
        if report.not_found > 0 {
            line.push_str(&format!(", {} missing", report.not_found));
        }
        if report.corrupt > 0 {
            line.push_str(&format!(", {} skipped as corrupt", report.corrupt));
        }
        self.bar.println(line);
    }
}

/// Write a candle table to a file in the specified format.
pub(crate) fn write_table(table: &Table, output: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Csv => CsvFormatter::new().write_table(table, writer)?,
        OutputFormat::Json => JsonFormatter::new().write_table(table, writer)?,
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_table(table, writer)?,
        OutputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                ParquetFormatter::new().write_table(table, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                drop(writer);
                anyhow::bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut table: Table = [Record::new(3661, 108_512, 108_600, 108_500, 108_550, 2.0)]
            .into_iter()
            .filter_map(|r| r.normalize(day))
            .collect();
        table.tag("Euro vs US Dollar");
        table
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eurusd.csv");

        write_table(&table(), &path, OutputFormat::Csv).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "time,open,high,low,close,volume,instrument_name\n\
             2024-01-01T01:01:01Z,108.512,108.6,108.5,108.55,2,Euro vs US Dollar\n"
        );
    }

    #[test]
    fn test_write_ndjson_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eurusd.ndjson");

        write_table(&table(), &path, OutputFormat::Ndjson).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"time\":\"2024-01-01T01:01:01Z\""));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(write_table(&table(), &path, OutputFormat::Csv).is_err());
    }
}
