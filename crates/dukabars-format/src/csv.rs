//! CSV output format.

use dukabars_types::Table;
use std::borrow::Cow;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Quotes a text field if it contains the delimiter, a quote or a newline.
    fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        if field.contains([self.delimiter, '"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(&self, table: &Table, mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        let with_names = table.has_instrument_names();

        if self.include_header {
            write!(writer, "{}", Table::COLUMNS.join(&d.to_string()))?;
            if with_names {
                write!(writer, "{d}{}", Table::INSTRUMENT_COLUMN)?;
            }
            writeln!(writer)?;
        }

        for row in table {
            write!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                row.time.format("%Y-%m-%dT%H:%M:%SZ"),
                row.open,
                row.high,
                row.low,
                row.close,
                row.volume
            )?;
            if with_names {
                let name = row.instrument_name.as_deref().unwrap_or_default();
                write!(writer, "{d}{}", self.escape(name))?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
