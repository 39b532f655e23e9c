//! SalesDash Forecast — daily sales forecasting behind the forecast panel.
//!
//! - `ForecastModel` trait and forecast output (history + future points)
//! - Seasonal-trend model (linear trend + day-of-week effects)
//! - Runner that applies the minimum-history gate before touching a model
//! - Holdout evaluation (MAE, RMSE, MAPE)
//! - Forecast horizon with slider semantics

pub mod evaluate;
pub mod horizon;
pub mod model;
pub mod runner;
pub mod seasonal;

pub use evaluate::{evaluate_holdout, ErrorMetrics};
pub use horizon::ForecastHorizon;
pub use model::{Forecast, ForecastError, ForecastModel, ForecastPoint};
pub use runner::{run_forecast, run_gated, ForecastOutcome, INSUFFICIENT_DATA_MESSAGE};
pub use seasonal::SeasonalTrendModel;
