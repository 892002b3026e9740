//! Append-only table of normalized rows.

use serde::{Deserialize, Serialize};

use crate::Row;

/// Ordered, append-only collection of [`Row`]s.
///
/// Rows are kept in insertion order: chronological within a symbol, and
/// symbol blocks in the order they were appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Column names shared by every table.
    pub const COLUMNS: [&'static str; 6] = ["time", "open", "high", "low", "close", "volume"];

    /// Name of the optional instrument column.
    pub const INSTRUMENT_COLUMN: &'static str = "instrument_name";

    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates an empty table with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a single row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Moves all rows of `other` to the end of this table.
    pub fn append(&mut self, mut other: Self) {
        self.rows.append(&mut other.rows);
    }

    /// Tags every row with the given instrument name.
    pub fn tag(&mut self, name: &str) {
        for row in &mut self.rows {
            row.instrument_name = Some(name.to_string());
        }
    }

    /// Returns the rows as a slice.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns an iterator over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if any row carries an instrument name.
    #[must_use]
    pub fn has_instrument_names(&self) -> bool {
        self.rows.iter().any(|r| r.instrument_name.is_some())
    }

    /// Returns contiguous runs of rows sharing the same instrument name.
    pub fn blocks(&self) -> impl Iterator<Item = (Option<&str>, &[Row])> {
        self.rows
            .chunk_by(|a, b| a.instrument_name == b.instrument_name)
            .map(|block| (block[0].instrument_name.as_deref(), block))
    }
}

impl Extend<Row> for Table {
    fn extend<I: IntoIterator<Item = Row>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
