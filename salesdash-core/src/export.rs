//! Exports — CSV series, JSON summary, Parquet snapshots.
//!
//! - **CSV**: filtered rows and each chart series, for spreadsheets
//! - **JSON**: a summary of one dashboard view
//! - **Parquet**: a typed snapshot of the filtered rows that reads back losslessly

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::aggregate::{ForecastGate, Metrics};
use crate::domain::OrderRecord;
use crate::view::DashboardView;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet error: {0}")]
    Parquet(String),
}

// ─── CSV ────────────────────────────────────────────────────────────

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Rows as CSV. Columns: order_date, sales, profit, discount, region,
/// category, year, month.
pub fn records_csv(records: &[OrderRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for r in records {
        wtr.serialize(r)?;
    }
    if records.is_empty() {
        wtr.write_record([
            "order_date", "sales", "profit", "discount", "region", "category", "year", "month",
        ])?;
    }
    finish_csv(wtr)
}

/// Daily series as `date,sales`.
pub fn time_series_csv(series: &[(NaiveDate, f64)]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "sales"])?;
    for (date, sales) in series {
        wtr.write_record([date.to_string(), sales.to_string()])?;
    }
    finish_csv(wtr)
}

/// Region totals as `region,sales`.
pub fn region_csv(by_region: &BTreeMap<String, f64>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["region", "sales"])?;
    for (region, sales) in by_region {
        wtr.write_record([region.clone(), sales.to_string()])?;
    }
    finish_csv(wtr)
}

/// Monthly totals as `year,month,sales`.
pub fn monthly_csv(by_month: &[((i32, u32), f64)]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["year", "month", "sales"])?;
    for ((year, month), sales) in by_month {
        wtr.write_record([year.to_string(), month.to_string(), sales.to_string()])?;
    }
    finish_csv(wtr)
}

/// Scatter points as `discount,profit`.
pub fn scatter_csv(points: &[(f64, f64)]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["discount", "profit"])?;
    for (discount, profit) in points {
        wtr.write_record([discount.to_string(), profit.to_string()])?;
    }
    finish_csv(wtr)
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Serializable digest of a dashboard view.
#[derive(Debug, Serialize)]
pub struct ViewSummary<'a> {
    pub region: &'a str,
    pub category: &'a str,
    pub metrics: Metrics,
    pub sales_by_region: &'a BTreeMap<String, f64>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub distinct_dates: usize,
    pub forecastable: bool,
}

impl<'a> ViewSummary<'a> {
    pub fn from_view(view: &'a DashboardView) -> Self {
        Self {
            region: view.selection.region.label(),
            category: view.selection.category.label(),
            metrics: view.metrics,
            sales_by_region: &view.sales_by_region,
            first_date: view.sales_over_time.first().map(|(d, _)| *d),
            last_date: view.sales_over_time.last().map(|(d, _)| *d),
            distinct_dates: view.sales_over_time.len(),
            forecastable: matches!(view.forecast_gate, ForecastGate::Ready(_)),
        }
    }
}

pub fn summary_json(view: &DashboardView) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&ViewSummary::from_view(view))?)
}

pub fn records_json(records: &[OrderRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

// ─── Parquet ────────────────────────────────────────────────────────

/// Write rows to a Parquet file. The write goes to `.tmp` and is renamed
/// into place.
pub fn write_parquet(records: &[OrderRecord], path: &Path) -> Result<(), ExportError> {
    let mut df = records_to_dataframe(records)?;
    let tmp_path = path.with_extension("parquet.tmp");

    let file = fs::File::create(&tmp_path)?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(|e| ExportError::Parquet(format!("write: {e}")))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ExportError::Io(e)
    })?;
    Ok(())
}

/// Read a snapshot written by [`write_parquet`].
pub fn read_parquet(path: &Path) -> Result<Vec<OrderRecord>, ExportError> {
    let file = fs::File::open(path)?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| ExportError::Parquet(format!("read: {e}")))?;
    dataframe_to_records(&df)
}

fn records_to_dataframe(records: &[OrderRecord]) -> Result<DataFrame, ExportError> {
    let epoch = NaiveDate::default();
    let dates: Vec<i32> = records
        .iter()
        .map(|r| (r.order_date - epoch).num_days() as i32)
        .collect();
    let sales: Vec<f64> = records.iter().map(|r| r.sales).collect();
    let profits: Vec<f64> = records.iter().map(|r| r.profit).collect();
    let discounts: Vec<f64> = records.iter().map(|r| r.discount).collect();
    let regions: Vec<String> = records.iter().map(|r| r.region.clone()).collect();
    let categories: Vec<String> = records.iter().map(|r| r.category.clone()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let months: Vec<u32> = records.iter().map(|r| r.month).collect();

    DataFrame::new(vec![
        Column::new("order_date".into(), dates)
            .cast(&DataType::Date)
            .map_err(|e| ExportError::Parquet(format!("date cast: {e}")))?,
        Column::new("sales".into(), sales),
        Column::new("profit".into(), profits),
        Column::new("discount".into(), discounts),
        Column::new("region".into(), regions),
        Column::new("category".into(), categories),
        Column::new("year".into(), years),
        Column::new("month".into(), months),
    ])
    .map_err(|e| ExportError::Parquet(format!("dataframe creation: {e}")))
}

fn dataframe_to_records(df: &DataFrame) -> Result<Vec<OrderRecord>, ExportError> {
    let map_err = |e: PolarsError| ExportError::Parquet(format!("column read: {e}"));

    let date_ca = df.column("order_date").map_err(map_err)?.date().map_err(map_err)?;
    let sales_ca = df.column("sales").map_err(map_err)?.f64().map_err(map_err)?;
    let profit_ca = df.column("profit").map_err(map_err)?.f64().map_err(map_err)?;
    let discount_ca = df.column("discount").map_err(map_err)?.f64().map_err(map_err)?;
    let region_ca = df.column("region").map_err(map_err)?.str().map_err(map_err)?;
    let category_ca = df.column("category").map_err(map_err)?.str().map_err(map_err)?;

    let epoch = NaiveDate::default();
    let null_at = |col: &str, i: usize| ExportError::Parquet(format!("null {col} at row {i}"));

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let days = date_ca.get(i).ok_or_else(|| null_at("order_date", i))?;
        records.push(OrderRecord::new(
            epoch + chrono::Duration::days(days as i64),
            sales_ca.get(i).ok_or_else(|| null_at("sales", i))?,
            profit_ca.get(i).ok_or_else(|| null_at("profit", i))?,
            discount_ca.get(i).ok_or_else(|| null_at("discount", i))?,
            region_ca.get(i).ok_or_else(|| null_at("region", i))?,
            category_ca.get(i).ok_or_else(|| null_at("category", i))?,
        ));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<OrderRecord> {
        vec![
            OrderRecord::new(date(2023, 1, 5), 1200.0, 100.0, 0.1, "East", "Tech"),
            OrderRecord::new(date(2014, 12, 31), 800.5, -50.25, 0.0, "Central Asia", "Office"),
        ]
    }

    #[test]
    fn records_csv_has_header_and_iso_dates() {
        let csv = records_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("order_date,sales,profit,discount,region,category,year,month")
        );
        assert_eq!(lines.next(), Some("2023-01-05,1200.0,100.0,0.1,East,Tech,2023,1"));
    }

    #[test]
    fn empty_records_csv_still_has_header() {
        let csv = records_csv(&[]).unwrap();
        assert!(csv.starts_with("order_date,sales"));
    }

    #[test]
    fn time_series_csv_layout() {
        let csv = time_series_csv(&[(date(2023, 1, 5), 2000.0)]).unwrap();
        assert_eq!(csv, "date,sales\n2023-01-05,2000\n");
    }

    #[test]
    fn parquet_snapshot_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.parquet");

        write_parquet(&sample(), &path).unwrap();
        let back = read_parquet(&path).unwrap();

        assert_eq!(back, sample());
        assert!(!path.with_extension("parquet.tmp").exists());
    }
}
