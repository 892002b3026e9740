//! Apache Parquet output format.

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use dukabars_types::{Row, Table};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for candle rows.
    fn schema(with_names: bool) -> Schema {
        let mut fields = vec![Field::new(
            "time",
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        )];
        fields.extend(
            Table::COLUMNS[1..]
                .iter()
                .map(|name| Field::new(*name, DataType::Float64, false)),
        );
        if with_names {
            fields.push(Field::new(Table::INSTRUMENT_COLUMN, DataType::Utf8, true));
        }
        Schema::new(fields)
    }

    /// Converts rows to an Arrow RecordBatch.
    fn rows_to_batch(
        schema: &Arc<Schema>,
        rows: &[Row],
        with_names: bool,
    ) -> Result<RecordBatch, FormatError> {
        let column = |f: fn(&Row) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
        };

        let timestamps: Vec<_> = rows.iter().map(|r| r.time.timestamp_micros()).collect();
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
            column(|r| r.open),
            column(|r| r.high),
            column(|r| r.low),
            column(|r| r.close),
            column(|r| r.volume),
        ];
        if with_names {
            let names: Vec<Option<&str>> =
                rows.iter().map(|r| r.instrument_name.as_deref()).collect();
            columns.push(Arc::new(StringArray::from(names)));
        }

        RecordBatch::try_new(Arc::clone(schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_table<W: Write + Send>(&self, table: &Table, writer: W) -> Result<(), FormatError> {
        let with_names = table.has_instrument_names();
        let schema = Arc::new(Self::schema(with_names));
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in table.rows().chunks(self.row_group_size) {
            let batch = Self::rows_to_batch(&schema, chunk, with_names)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
