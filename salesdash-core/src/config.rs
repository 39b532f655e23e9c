//! Dashboard configuration, read from `salesdash.toml`.
//!
//! Every key is optional; a missing file means all defaults.
//!
//! ```toml
//! data_path = "SuperStoreOrders.csv"
//!
//! [forecast]
//! default_horizon = 90
//! min_distinct_dates = 30
//! holdout_days = 30
//!
//! [logging]
//! dir = "logs"
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::MIN_FORECAST_DATES;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "salesdash.toml";

/// Shortest and longest forecast horizon the controls allow, in days.
pub const HORIZON_MIN_DAYS: u32 = 30;
pub const HORIZON_MAX_DAYS: u32 = 365;
pub const HORIZON_DEFAULT_DAYS: u32 = 90;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Source CSV file.
    pub data_path: PathBuf,
    pub forecast: ForecastSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Initial horizon in days, within [30, 365].
    pub default_horizon: u32,
    /// Distinct dates required before a forecast is attempted.
    pub min_distinct_dates: usize,
    /// Trailing points held out when scoring the model.
    pub holdout_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub dir: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("SuperStoreOrders.csv"),
            forecast: ForecastSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            default_horizon: HORIZON_DEFAULT_DAYS,
            min_distinct_dates: MIN_FORECAST_DATES,
            holdout_days: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path must exist; without one, `salesdash.toml` in the working
    /// directory is used if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.forecast;
        if !(HORIZON_MIN_DAYS..=HORIZON_MAX_DAYS).contains(&f.default_horizon) {
            return Err(ConfigError::Invalid(format!(
                "forecast.default_horizon must be within [{HORIZON_MIN_DAYS}, {HORIZON_MAX_DAYS}], got {}",
                f.default_horizon
            )));
        }
        if f.min_distinct_dates < 2 {
            return Err(ConfigError::Invalid(format!(
                "forecast.min_distinct_dates must be at least 2, got {}",
                f.min_distinct_dates
            )));
        }
        if f.holdout_days == 0 {
            return Err(ConfigError::Invalid("forecast.holdout_days must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_controls() {
        let c = DashboardConfig::default();
        assert_eq!(c.forecast.default_horizon, 90);
        assert_eq!(c.forecast.min_distinct_dates, 30);
        assert_eq!(c.data_path, PathBuf::from("SuperStoreOrders.csv"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let c = DashboardConfig::from_toml(
            r#"
            data_path = "orders.csv"

            [forecast]
            default_horizon = 120
            "#,
        )
        .unwrap();
        assert_eq!(c.data_path, PathBuf::from("orders.csv"));
        assert_eq!(c.forecast.default_horizon, 120);
        assert_eq!(c.forecast.min_distinct_dates, 30);
        assert_eq!(c.logging.level, "info");
    }

    #[test]
    fn out_of_range_horizon_is_rejected() {
        let err = DashboardConfig::from_toml("[forecast]\ndefault_horizon = 400\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DashboardConfig::from_toml("data_path = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salesdash.toml");
        let mut c = DashboardConfig::default();
        c.forecast.holdout_days = 14;
        std::fs::write(&path, toml::to_string_pretty(&c).unwrap()).unwrap();

        assert_eq!(DashboardConfig::from_file(&path).unwrap(), c);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/salesdash.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
