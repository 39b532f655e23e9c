//! Aggregations over a (filtered) set of orders.
//!
//! All functions take a plain slice so they work on the cleaned table and on
//! any filtered view alike. Empty input is valid and yields zeros / empty
//! collections.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::OrderRecord;

/// Fewest distinct dates a forecast may be fitted on.
pub const MIN_FORECAST_DATES: usize = 30;

/// Headline figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_sales: f64,
    pub total_profit: f64,
    pub order_count: usize,
}

pub fn aggregate_metrics(records: &[OrderRecord]) -> Metrics {
    records.iter().fold(Metrics::default(), |mut m, r| {
        m.total_sales += r.sales;
        m.total_profit += r.profit;
        m.order_count += 1;
        m
    })
}

/// Daily sales totals, ascending by date, one entry per distinct date.
pub fn sales_over_time(records: &[OrderRecord]) -> Vec<(NaiveDate, f64)> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *by_date.entry(r.order_date).or_insert(0.0) += r.sales;
    }
    by_date.into_iter().collect()
}

/// Sales totals per region.
pub fn sales_by_region(records: &[OrderRecord]) -> BTreeMap<String, f64> {
    let mut by_region: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *by_region.entry(r.region.clone()).or_insert(0.0) += r.sales;
    }
    by_region
}

/// Sales totals per (year, month), ascending.
pub fn sales_by_month(records: &[OrderRecord]) -> Vec<((i32, u32), f64)> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in records {
        *by_month.entry((r.year, r.month)).or_insert(0.0) += r.sales;
    }
    by_month.into_iter().collect()
}

/// Raw (discount, profit) pairs, one per row.
pub fn discount_profit_points(records: &[OrderRecord]) -> Vec<(f64, f64)> {
    records.iter().map(|r| (r.discount, r.profit)).collect()
}

/// One row of forecast input: `ds` is the date, `y` the summed sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub ds: NaiveDate,
    pub y: f64,
}

/// Two-column daily series handed to a forecasting model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastInput {
    pub rows: Vec<SeriesPoint>,
}

impl ForecastInput {
    /// Same aggregation as [`sales_over_time`], reshaped to `(ds, y)`.
    pub fn prepare(records: &[OrderRecord]) -> Self {
        let rows = sales_over_time(records)
            .into_iter()
            .map(|(ds, y)| SeriesPoint { ds, y })
            .collect();
        Self { rows }
    }

    pub fn distinct_dates(&self) -> usize {
        self.rows.len()
    }

    /// Apply the minimum-history policy.
    pub fn gate(self, min_dates: usize) -> ForecastGate {
        let distinct_dates = self.distinct_dates();
        if distinct_dates < min_dates {
            ForecastGate::InsufficientData {
                distinct_dates,
                required: min_dates,
            }
        } else {
            ForecastGate::Ready(self)
        }
    }
}

/// Outcome of the minimum-history policy check.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastGate {
    Ready(ForecastInput),
    InsufficientData { distinct_dates: usize, required: usize },
}

impl ForecastGate {
    pub fn is_ready(&self) -> bool {
        matches!(self, ForecastGate::Ready(_))
    }
}
