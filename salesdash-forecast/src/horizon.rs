//! Forecast horizon: whole days within the slider range.

use serde::{Deserialize, Serialize};

use salesdash_core::config::{HORIZON_DEFAULT_DAYS, HORIZON_MAX_DAYS, HORIZON_MIN_DAYS};

use crate::model::ForecastError;

/// Days to predict past the last observed date. Always within
/// [`HORIZON_MIN_DAYS`, `HORIZON_MAX_DAYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ForecastHorizon(u32);

impl ForecastHorizon {
    pub const MIN: Self = Self(HORIZON_MIN_DAYS);
    pub const MAX: Self = Self(HORIZON_MAX_DAYS);

    /// Clamp into range, like dragging a slider past its end.
    pub fn new(days: u32) -> Self {
        Self(days.clamp(HORIZON_MIN_DAYS, HORIZON_MAX_DAYS))
    }

    pub fn try_new(days: u32) -> Result<Self, ForecastError> {
        if (HORIZON_MIN_DAYS..=HORIZON_MAX_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(ForecastError::HorizonOutOfRange {
                days,
                min: HORIZON_MIN_DAYS,
                max: HORIZON_MAX_DAYS,
            })
        }
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// Move by `delta` days, clamped.
    pub fn step(self, delta: i32) -> Self {
        let days = (self.0 as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32;
        Self::new(days)
    }

    /// Position within the range as a fraction in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        (self.0 - HORIZON_MIN_DAYS) as f64 / (HORIZON_MAX_DAYS - HORIZON_MIN_DAYS) as f64
    }
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self(HORIZON_DEFAULT_DAYS)
    }
}

impl From<u32> for ForecastHorizon {
    fn from(days: u32) -> Self {
        Self::new(days)
    }
}

impl From<ForecastHorizon> for u32 {
    fn from(h: ForecastHorizon) -> Self {
        h.0
    }
}
