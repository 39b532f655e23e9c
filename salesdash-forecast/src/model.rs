//! Forecast model trait and forecast output.
//!
//! A model is fitted on a daily `(ds, y)` series and then predicts the
//! in-sample points followed by `days` future daily points.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use salesdash_core::SeriesPoint;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("model '{0}' has not been fitted")]
    NotFitted(String),

    #[error("need at least {required} points to fit, got {got}")]
    TooFewPoints { got: usize, required: usize },

    #[error("horizon {days} outside [{min}, {max}] days")]
    HorizonOutOfRange { days: u32, min: u32, max: u32 },

    #[error("holdout must be at least one point")]
    EmptyHoldout,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for forecasting models.
///
/// `fit` replaces any previous fit. `predict` returns one point per fitted
/// history date, then `days` consecutive future days after the last one.
pub trait ForecastModel: Send + Sync {
    /// Human-readable name (e.g., "seasonal_trend").
    fn name(&self) -> &str;

    fn fit(&mut self, history: &[SeriesPoint]) -> Result<(), ForecastError>;

    fn predict(&self, days: usize) -> Result<Forecast, ForecastError>;
}

/// One predicted day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    /// `false` for in-sample points.
    pub is_future: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub model: String,
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn history(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter().filter(|p| !p.is_future)
    }

    pub fn future(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter().filter(|p| p.is_future)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Columns: ds, yhat, yhat_lower, yhat_upper, is_future.
    pub fn to_csv(&self) -> Result<String, ForecastError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for p in &self.points {
            wtr.serialize(p)?;
        }
        let bytes = wtr.into_inner().map_err(|e| ForecastError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            ForecastError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
