//! Date range and day iteration.

use chrono::NaiveDate;

use crate::DateRangeError;

/// The only accepted textual date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
///
/// Matching is strict: the input must be exactly ten characters with
/// zero-padded month and day, so `2024-1-5` or `2024-01-05T00:00` are
/// rejected.
///
/// # Errors
///
/// Returns [`DateRangeError::MalformedDate`] if the string does not match.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateRangeError> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shaped {
        return Err(DateRangeError::MalformedDate(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| DateRangeError::MalformedDate(s.to_string()))
}

/// A range of calendar days for data retrieval.
///
/// The end date is exclusive: `2024-01-01..2024-01-03` covers two days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (exclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or start > end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Creates a date range covering exactly one day.
    #[must_use]
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date.succ_opt().unwrap_or(date),
        }
    }

    /// Returns an iterator over every day in the range, in ascending order.
    pub const fn days(&self) -> DayIterator {
        DayIterator {
            current: self.start,
            end: self.end,
        }
    }

    /// Returns the number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        usize::try_from((self.end - self.start).num_days()).unwrap_or(0)
    }

    /// Returns true if the range covers no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {} (exclusive)", self.start, self.end)
    }
}

/// Iterator over all days in a date range.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: NaiveDate,
    end: NaiveDate,
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }

        let result = self.current;
        self.current = self.current.succ_opt().unwrap_or(self.end);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let days = usize::try_from((self.end - self.current).num_days()).unwrap_or(0);
        (days, Some(days))
    }
}

impl ExactSizeIterator for DayIterator {}
