//! Seasonal-trend model: linear trend plus additive day-of-week effects.
//!
//! Fit:
//! 1. Ordinary least squares of `y` on the day offset from the first date
//! 2. Day-of-week effect = mean trend residual on that weekday
//! 3. σ = RMS of what is left after trend and weekday effect
//!
//! The interval is `yhat ± z·σ` with z = 1.2816 (80 %).

use chrono::{Datelike, Duration, NaiveDate};

use salesdash_core::SeriesPoint;

use crate::model::{Forecast, ForecastError, ForecastModel, ForecastPoint};

/// Two-sided 80 % normal quantile.
const INTERVAL_Z: f64 = 1.2816;

const MIN_FIT_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
struct Fit {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
    weekday: [f64; 7],
    sigma: f64,
    dates: Vec<NaiveDate>,
}

impl Fit {
    fn yhat(&self, ds: NaiveDate) -> f64 {
        let x = (ds - self.origin).num_days() as f64;
        let wd = ds.weekday().num_days_from_monday() as usize;
        self.intercept + self.slope * x + self.weekday[wd]
    }

    fn point(&self, ds: NaiveDate, is_future: bool) -> ForecastPoint {
        let yhat = self.yhat(ds);
        let half_width = INTERVAL_Z * self.sigma;
        ForecastPoint {
            ds,
            yhat,
            yhat_lower: yhat - half_width,
            yhat_upper: yhat + half_width,
            is_future,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeasonalTrendModel {
    fit: Option<Fit>,
}

impl SeasonalTrendModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(slope per day, weekday effects Monday..Sunday)` of the current fit.
    pub fn components(&self) -> Option<(f64, [f64; 7])> {
        self.fit.as_ref().map(|f| (f.slope, f.weekday))
    }
}

impl ForecastModel for SeasonalTrendModel {
    fn name(&self) -> &str {
        "seasonal_trend"
    }

    fn fit(&mut self, history: &[SeriesPoint]) -> Result<(), ForecastError> {
        if history.len() < MIN_FIT_POINTS {
            return Err(ForecastError::TooFewPoints {
                got: history.len(),
                required: MIN_FIT_POINTS,
            });
        }

        let mut points = history.to_vec();
        points.sort_by_key(|p| p.ds);
        let origin = points[0].ds;
        let n = points.len() as f64;

        let xs: Vec<f64> = points
            .iter()
            .map(|p| (p.ds - origin).num_days() as f64)
            .collect();
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = points.iter().map(|p| p.y).sum::<f64>() / n;

        let (mut sxx, mut sxy) = (0.0, 0.0);
        for (x, p) in xs.iter().zip(&points) {
            sxx += (x - x_mean) * (x - x_mean);
            sxy += (x - x_mean) * (p.y - y_mean);
        }
        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        let intercept = y_mean - slope * x_mean;

        let residuals: Vec<f64> = xs
            .iter()
            .zip(&points)
            .map(|(x, p)| p.y - (intercept + slope * x))
            .collect();

        let mut sums = [0.0f64; 7];
        let mut counts = [0usize; 7];
        for (r, p) in residuals.iter().zip(&points) {
            let wd = p.ds.weekday().num_days_from_monday() as usize;
            sums[wd] += r;
            counts[wd] += 1;
        }
        let mut weekday = [0.0f64; 7];
        for wd in 0..7 {
            if counts[wd] > 0 {
                weekday[wd] = sums[wd] / counts[wd] as f64;
            }
        }

        let sse: f64 = residuals
            .iter()
            .zip(&points)
            .map(|(r, p)| {
                let e = r - weekday[p.ds.weekday().num_days_from_monday() as usize];
                e * e
            })
            .sum();
        let sigma = (sse / n).sqrt();

        self.fit = Some(Fit {
            origin,
            intercept,
            slope,
            weekday,
            sigma,
            dates: points.iter().map(|p| p.ds).collect(),
        });
        Ok(())
    }

    fn predict(&self, days: usize) -> Result<Forecast, ForecastError> {
        let fit = self
            .fit
            .as_ref()
            .ok_or_else(|| ForecastError::NotFitted(self.name().to_string()))?;

        let mut points: Vec<ForecastPoint> = Vec::with_capacity(fit.dates.len() + days);
        points.extend(fit.dates.iter().map(|&ds| fit.point(ds, false)));

        if let Some(&last) = fit.dates.last() {
            for step in 1..=days as i64 {
                points.push(fit.point(last + Duration::days(step), true));
            }
        }

        Ok(Forecast {
            model: self.name().to_string(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize, f: impl Fn(usize, NaiveDate) -> f64) -> Vec<SeriesPoint> {
        // 2023-01-02 is a Monday.
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        (0..n)
            .map(|i| {
                let ds = start + Duration::days(i as i64);
                SeriesPoint { ds, y: f(i, ds) }
            })
            .collect()
    }

    #[test]
    fn predict_before_fit_fails() {
        let m = SeasonalTrendModel::new();
        assert!(matches!(m.predict(30), Err(ForecastError::NotFitted(_))));
    }

    #[test]
    fn single_point_is_too_few() {
        let mut m = SeasonalTrendModel::new();
        let err = m.fit(&series(1, |_, _| 1.0)).unwrap_err();
        assert!(matches!(err, ForecastError::TooFewPoints { got: 1, required: 2 }));
    }

    #[test]
    fn linear_series_is_recovered_exactly() {
        let mut m = SeasonalTrendModel::new();
        m.fit(&series(40, |i, _| 50.0 + 3.0 * i as f64)).unwrap();
        let f = m.predict(10).unwrap();

        assert_eq!(f.len(), 50);
        let last = f.points.last().unwrap();
        assert!((last.yhat - (50.0 + 3.0 * 49.0)).abs() < 1e-9);
        assert!((last.yhat_upper - last.yhat).abs() < 1e-9);
    }

    #[test]
    fn weekday_effect_is_picked_up() {
        let mut m = SeasonalTrendModel::new();
        m.fit(&series(56, |i, ds| {
            let bump = if ds.weekday() == chrono::Weekday::Sat { 10.0 } else { 0.0 };
            100.0 + 0.5 * i as f64 + bump
        }))
        .unwrap();

        let (slope, weekday) = m.components().unwrap();
        assert!((slope - 0.5).abs() < 0.1);
        assert!(weekday[5] > weekday[4] + 5.0);
        assert!(weekday[5] > weekday[6] + 5.0);
    }

    #[test]
    fn future_days_follow_last_date() {
        let mut m = SeasonalTrendModel::new();
        let hist = series(30, |i, _| (i % 5) as f64);
        m.fit(&hist).unwrap();
        let f = m.predict(3).unwrap();

        let future: Vec<_> = f.future().map(|p| p.ds).collect();
        let last = hist.last().unwrap().ds;
        assert_eq!(
            future,
            vec![last + Duration::days(1), last + Duration::days(2), last + Duration::days(3)]
        );
        assert!(f.points.iter().all(|p| p.yhat_lower <= p.yhat && p.yhat <= p.yhat_upper));
    }

    #[test]
    fn unsorted_history_is_fitted_in_date_order() {
        let mut hist = series(10, |i, _| i as f64);
        hist.reverse();
        let mut m = SeasonalTrendModel::new();
        m.fit(&hist).unwrap();
        let f = m.predict(0).unwrap();
        assert!(f.points.windows(2).all(|w| w[0].ds < w[1].ds));
    }
}
