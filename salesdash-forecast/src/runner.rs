//! Forecast runner: apply the minimum-history gate, then fit and predict.

use tracing::info;

use salesdash_core::{ForecastGate, ForecastInput};

use crate::horizon::ForecastHorizon;
use crate::model::{Forecast, ForecastError, ForecastModel};

/// Warning shown in place of a forecast when the gate is closed.
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Not enough data for forecasting. Try selecting 'All' filters.";

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Forecast(Forecast),
    /// Too little history; the model was not touched.
    Skipped { distinct_dates: usize, required: usize },
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            ForecastOutcome::Forecast(f) => Some(f),
            ForecastOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ForecastOutcome::Skipped { .. })
    }
}

/// Gate `input` on `min_dates` distinct dates, then fit and predict.
pub fn run_forecast<M>(
    input: ForecastInput,
    horizon: ForecastHorizon,
    model: &mut M,
    min_dates: usize,
) -> Result<ForecastOutcome, ForecastError>
where
    M: ForecastModel + ?Sized,
{
    run_gated(&input.gate(min_dates), horizon, model)
}

/// Same as [`run_forecast`] for a gate that has already been evaluated, as
/// held by a dashboard view.
pub fn run_gated<M>(
    gate: &ForecastGate,
    horizon: ForecastHorizon,
    model: &mut M,
) -> Result<ForecastOutcome, ForecastError>
where
    M: ForecastModel + ?Sized,
{
    match gate {
        ForecastGate::InsufficientData {
            distinct_dates,
            required,
        } => {
            info!(distinct_dates, required, "forecast skipped: not enough history");
            Ok(ForecastOutcome::Skipped {
                distinct_dates: *distinct_dates,
                required: *required,
            })
        }
        ForecastGate::Ready(input) => {
            model.fit(&input.rows)?;
            let forecast = model.predict(horizon.days() as usize)?;
            info!(
                model = model.name(),
                history = input.rows.len(),
                horizon = horizon.days(),
                "forecast computed"
            );
            Ok(ForecastOutcome::Forecast(forecast))
        }
    }
}
