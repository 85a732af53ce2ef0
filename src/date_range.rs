use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Inclusive date interval. Iterating yields every date once, ascending; a range
/// whose end lies before its start is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[year-01-01, year-12-31]`, or `None` when the year is outside chrono's range.
    pub fn for_year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self::new(start, end))
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of dates in the range.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap of two ranges, `None` when they do not share a date.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        let range = DateRange::new(self.start.max(other.start), self.end.min(other.end));
        if range.is_empty() { None } else { Some(range) }
    }

    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateRangeIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|date| *date <= self.end)?;
        self.next = if current < self.end {
            current.checked_add_signed(Duration::days(1))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(next) if next <= self.end => (self.end - next).num_days() as usize + 1,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRangeIter {}

impl FusedIterator for DateRangeIter {}
