//! Domain types: one cleaned order row and the cleaned table.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A fully parsed order. Every field is present; rows that could not be
/// parsed never become an `OrderRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub sales: f64,
    pub profit: f64,
    pub discount: f64,
    pub region: String,
    pub category: String,
    /// Calendar year of `order_date`.
    pub year: i32,
    /// Calendar month of `order_date` (1..=12).
    pub month: u32,
}

impl OrderRecord {
    /// Build a record, deriving `year` and `month` from the order date.
    pub fn new(
        order_date: NaiveDate,
        sales: f64,
        profit: f64,
        discount: f64,
        region: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            order_date,
            sales,
            profit,
            discount,
            region: region.into(),
            category: category.into(),
            year: order_date.year(),
            month: order_date.month(),
        }
    }
}

/// Row counts from a cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl CleanStats {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// The dataset after parsing, coercion and the required-field drop.
///
/// Records keep the order they had in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    source: PathBuf,
    records: Vec<OrderRecord>,
    stats: CleanStats,
}

impl CleanedTable {
    pub fn new(source: impl Into<PathBuf>, records: Vec<OrderRecord>, stats: CleanStats) -> Self {
        Self {
            source: source.into(),
            records,
            stats,
        }
    }

    /// Build a table directly from records (tests, in-memory sources).
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        let stats = CleanStats {
            rows_read: records.len(),
            rows_dropped: 0,
        };
        Self::new(PathBuf::new(), records, stats)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn stats(&self) -> CleanStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last order date, if any rows survived cleaning.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.order_date).min()?;
        let last = self.records.iter().map(|r| r.order_date).max()?;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_derives_year_and_month() {
        let rec = OrderRecord::new(date(2014, 11, 3), 10.0, 1.0, 0.0, "East", "Tech");
        assert_eq!(rec.year, 2014);
        assert_eq!(rec.month, 11);
    }

    #[test]
    fn date_range_spans_min_and_max() {
        let table = CleanedTable::from_records(vec![
            OrderRecord::new(date(2023, 3, 1), 1.0, 0.0, 0.0, "East", "Tech"),
            OrderRecord::new(date(2023, 1, 5), 1.0, 0.0, 0.0, "East", "Tech"),
            OrderRecord::new(date(2023, 2, 9), 1.0, 0.0, 0.0, "West", "Office"),
        ]);
        assert_eq!(table.date_range(), Some((date(2023, 1, 5), date(2023, 3, 1))));
    }

    #[test]
    fn empty_table_has_no_date_range() {
        let table = CleanedTable::from_records(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.date_range(), None);
        assert_eq!(table.stats().rows_kept(), 0);
    }
}
