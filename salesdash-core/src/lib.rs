//! SalesDash Core — order data pipeline behind the dashboard.
//!
//! This crate owns everything between the source file and the charts:
//! - Order record model with derived calendar fields
//! - CSV ingest and cleaning (day-first dates, thousands separators, dropna)
//! - Process-wide dataset cache (load once, never invalidated)
//! - Region/category filters and the "All" sentinel
//! - Aggregates: metrics, daily series, region totals, monthly totals
//! - Forecast input preparation and the minimum-history gate
//! - Dashboard view: the pure `(filters) -> view` pipeline
//! - Config, number formatting, CSV/JSON/Parquet exports

pub mod aggregate;
pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod filter;
pub mod format;
pub mod view;

pub use aggregate::{ForecastGate, ForecastInput, Metrics, SeriesPoint};
pub use config::{ConfigError, DashboardConfig};
pub use data::{load_and_clean, DataError};
pub use domain::{CleanStats, CleanedTable, OrderRecord};
pub use filter::{apply_filters, FilterSelection, Selector};
pub use view::DashboardView;
