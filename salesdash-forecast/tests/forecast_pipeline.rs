//! Forecasting over dashboard views built from a cleaned table.
//!
//! 1. Filter that leaves < 30 dates skips the forecast
//! 2. Unfiltered view forecasts history + horizon
//! 3. Forecast shape holds for any series and horizon (proptest)

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use salesdash_core::aggregate::MIN_FORECAST_DATES;
use salesdash_core::{CleanedTable, DashboardView, FilterSelection, OrderRecord, SeriesPoint};
use salesdash_forecast::{
    run_gated, ForecastHorizon, ForecastModel, ForecastOutcome, SeasonalTrendModel,
};

/// 60 days of East orders, plus West orders on only the first 29 days.
fn table() -> CleanedTable {
    let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    let mut records = Vec::new();
    for i in 0..60 {
        let ds = start + Duration::days(i);
        records.push(OrderRecord::new(ds, 100.0 + i as f64, 10.0, 0.1, "East", "Technology"));
        if i < 29 {
            records.push(OrderRecord::new(ds, 40.0, -2.0, 0.3, "West", "Furniture"));
        }
    }
    CleanedTable::from_records(records)
}

#[test]
fn narrow_filter_skips_forecast() {
    let view = DashboardView::compute(
        &table(),
        &FilterSelection::new("West", "Furniture"),
        MIN_FORECAST_DATES,
    );
    let outcome = run_gated(
        &view.forecast_gate,
        ForecastHorizon::default(),
        &mut SeasonalTrendModel::new(),
    )
    .unwrap();

    assert_eq!(
        outcome,
        ForecastOutcome::Skipped { distinct_dates: 29, required: 30 }
    );
}

#[test]
fn unfiltered_view_forecasts_history_and_horizon() {
    let view = DashboardView::compute(&table(), &FilterSelection::all(), MIN_FORECAST_DATES);
    let outcome = run_gated(
        &view.forecast_gate,
        ForecastHorizon::default(),
        &mut SeasonalTrendModel::new(),
    )
    .unwrap();
    let forecast = outcome.forecast().unwrap();

    assert_eq!(forecast.history().count(), 60);
    assert_eq!(forecast.future().count(), 90);
    let first_future = forecast.future().next().unwrap();
    assert_eq!(first_future.ds, NaiveDate::from_ymd_opt(2023, 4, 30).unwrap());
}

fn arb_series() -> impl Strategy<Value = Vec<SeriesPoint>> {
    prop::collection::btree_map(0i64..500, 0.0..10_000.0f64, 2..120).prop_map(|days| {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        days.into_iter()
            .map(|(d, y)| SeriesPoint {
                ds: start + Duration::days(d),
                y,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn forecast_shape(series in arb_series(), days in 30u32..=365) {
        let mut model = SeasonalTrendModel::new();
        model.fit(&series).unwrap();
        let forecast = model.predict(ForecastHorizon::new(days).days() as usize).unwrap();

        prop_assert_eq!(forecast.len(), series.len() + days as usize);
        prop_assert!(forecast.points.windows(2).all(|w| w[0].ds < w[1].ds));
        prop_assert!(forecast
            .points
            .iter()
            .all(|p| p.yhat_lower <= p.yhat && p.yhat <= p.yhat_upper));

        let last = series.last().unwrap().ds;
        let future: Vec<_> = forecast.future().collect();
        prop_assert_eq!(future[0].ds, last + Duration::days(1));
        prop_assert_eq!(future[future.len() - 1].ds, last + Duration::days(days as i64));
    }
}
