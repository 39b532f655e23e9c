//! Holdout scoring: fit on all but the trailing points, score the rest.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use salesdash_core::SeriesPoint;

use crate::model::{ForecastError, ForecastModel};

/// Error metrics for a holdout evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero actuals only. `None` when
    /// every actual is zero.
    pub mape: Option<f64>,
    /// Points scored.
    pub holdout: usize,
}

/// Fit `model` on `series[..len - holdout]` and score its predictions for the
/// last `holdout` points. `series` must be in ascending date order.
///
/// Leaves `model` fitted on the training part.
pub fn evaluate_holdout<M>(
    model: &mut M,
    series: &[SeriesPoint],
    holdout: usize,
) -> Result<ErrorMetrics, ForecastError>
where
    M: ForecastModel + ?Sized,
{
    if holdout == 0 {
        return Err(ForecastError::EmptyHoldout);
    }
    let train_len = series.len().saturating_sub(holdout);
    if train_len < 2 {
        return Err(ForecastError::TooFewPoints {
            got: train_len,
            required: 2,
        });
    }
    let (train, test) = series.split_at(train_len);

    model.fit(train)?;
    let last_train = train[train_len - 1].ds;
    let last_test = test[test.len() - 1].ds;
    let days = (last_test - last_train).num_days().max(0) as usize;
    let forecast = model.predict(days)?;

    let predicted: HashMap<_, _> = forecast.future().map(|p| (p.ds, p.yhat)).collect();

    let (mut abs_sum, mut sq_sum, mut pct_sum, mut pct_n, mut n) = (0.0, 0.0, 0.0, 0usize, 0usize);
    for actual in test {
        let Some(&yhat) = predicted.get(&actual.ds) else {
            continue;
        };
        let err = actual.y - yhat;
        abs_sum += err.abs();
        sq_sum += err * err;
        if actual.y != 0.0 {
            pct_sum += (err / actual.y).abs();
            pct_n += 1;
        }
        n += 1;
    }

    if n == 0 {
        return Err(ForecastError::EmptyHoldout);
    }

    let metrics = ErrorMetrics {
        mae: abs_sum / n as f64,
        rmse: (sq_sum / n as f64).sqrt(),
        mape: (pct_n > 0).then(|| 100.0 * pct_sum / pct_n as f64),
        holdout: n,
    };
    info!(
        model = model.name(),
        holdout = n,
        mae = metrics.mae,
        rmse = metrics.rmse,
        "holdout evaluation"
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    use crate::seasonal::SeasonalTrendModel;

    fn series(values: &[f64]) -> Vec<SeriesPoint> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| SeriesPoint {
                ds: start + Duration::days(i as i64),
                y,
            })
            .collect()
    }

    #[test]
    fn perfect_fit_scores_zero() {
        let values: Vec<f64> = (0..60).map(|i| 10.0 + 2.0 * i as f64).collect();
        let m = evaluate_holdout(&mut SeasonalTrendModel::new(), &series(&values), 14).unwrap();
        assert_eq!(m.holdout, 14);
        assert!(m.mae < 1e-9);
        assert!(m.rmse < 1e-9);
        assert!(m.mape.unwrap() < 1e-9);
    }

    #[test]
    fn constant_offset_shows_in_mae() {
        // Flat history, then the holdout jumps by 5.
        let mut values = vec![100.0; 50];
        values.extend(vec![105.0; 10]);
        let m = evaluate_holdout(&mut SeasonalTrendModel::new(), &series(&values), 10).unwrap();
        assert!((m.mae - 5.0).abs() < 1e-9);
        assert!((m.rmse - 5.0).abs() < 1e-9);
        assert!((m.mape.unwrap() - 100.0 * 5.0 / 105.0).abs() < 1e-9);
    }

    #[test]
    fn zero_actuals_are_left_out_of_mape() {
        let mut values = vec![0.0; 30];
        values.extend(vec![0.0; 5]);
        let m = evaluate_holdout(&mut SeasonalTrendModel::new(), &series(&values), 5).unwrap();
        assert_eq!(m.mape, None);
        assert_eq!(m.mae, 0.0);
    }

    #[test]
    fn holdout_needs_two_training_points() {
        let err = evaluate_holdout(&mut SeasonalTrendModel::new(), &series(&[1.0, 2.0, 3.0]), 2)
            .unwrap_err();
        assert!(matches!(err, ForecastError::TooFewPoints { got: 1, required: 2 }));
    }

    #[test]
    fn zero_holdout_is_rejected() {
        let err = evaluate_holdout(&mut SeasonalTrendModel::new(), &series(&[1.0; 10]), 0)
            .unwrap_err();
        assert!(matches!(err, ForecastError::EmptyHoldout));
    }

    #[test]
    fn gaps_in_the_holdout_are_matched_by_date() {
        let mut s = series(&(0..40).map(|i| i as f64).collect::<Vec<_>>());
        // Drop every other holdout day.
        let tail: Vec<_> = s.split_off(30).into_iter().step_by(2).collect();
        s.extend(tail);
        let m = evaluate_holdout(&mut SeasonalTrendModel::new(), &s, 5).unwrap();
        assert_eq!(m.holdout, 5);
        assert!(m.mae < 1e-9);
    }
}
