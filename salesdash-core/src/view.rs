//! The dashboard view: everything the charts and metrics need for one
//! filter selection, recomputed from scratch on every change.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregate::{self, ForecastGate, ForecastInput, Metrics};
use crate::domain::{CleanedTable, OrderRecord};
use crate::filter::{apply_filters, FilterSelection};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub filtered: Vec<OrderRecord>,
    pub metrics: Metrics,
    pub sales_over_time: Vec<(NaiveDate, f64)>,
    pub sales_by_region: BTreeMap<String, f64>,
    pub sales_by_month: Vec<((i32, u32), f64)>,
    pub discount_profit: Vec<(f64, f64)>,
    pub forecast_gate: ForecastGate,
}

impl DashboardView {
    /// `(filters) -> filtered table -> aggregates`. Pure: the cleaned table is
    /// only read.
    pub fn compute(table: &CleanedTable, selection: &FilterSelection, min_forecast_dates: usize) -> Self {
        let filtered = apply_filters(table.records(), selection);
        let metrics = aggregate::aggregate_metrics(&filtered);
        let sales_over_time = aggregate::sales_over_time(&filtered);
        let sales_by_region = aggregate::sales_by_region(&filtered);
        let sales_by_month = aggregate::sales_by_month(&filtered);
        let discount_profit = aggregate::discount_profit_points(&filtered);
        let forecast_gate = ForecastInput::prepare(&filtered).gate(min_forecast_dates);

        debug!(
            region = %selection.region,
            category = %selection.category,
            rows = filtered.len(),
            dates = sales_over_time.len(),
            forecastable = forecast_gate.is_ready(),
            "dashboard view recomputed"
        );

        Self {
            selection: selection.clone(),
            filtered,
            metrics,
            sales_over_time,
            sales_by_region,
            sales_by_month,
            discount_profit,
            forecast_gate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MIN_FORECAST_DATES;
    use crate::filter::Selector;

    fn table() -> CleanedTable {
        let d = |day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
        CleanedTable::from_records(vec![
            OrderRecord::new(d(5), 1200.0, 100.0, 0.1, "East", "Tech"),
            OrderRecord::new(d(5), 800.0, 50.0, 0.0, "East", "Tech"),
            OrderRecord::new(d(6), 300.0, -20.0, 0.4, "West", "Office"),
        ])
    }

    #[test]
    fn view_is_consistent_with_filter() {
        let view = DashboardView::compute(
            &table(),
            &FilterSelection::new("East", Selector::All),
            MIN_FORECAST_DATES,
        );
        assert_eq!(view.metrics.total_sales, 2000.0);
        assert_eq!(view.metrics.order_count, 2);
        assert_eq!(view.sales_over_time.len(), 1);
        assert_eq!(view.sales_by_region.len(), 1);
        assert_eq!(view.discount_profit.len(), 2);
        assert!(!view.forecast_gate.is_ready());
    }

    #[test]
    fn view_does_not_touch_the_table() {
        let t = table();
        let before = t.clone();
        let _ = DashboardView::compute(&t, &FilterSelection::new("West", "Office"), 1);
        assert_eq!(t, before);
    }

    #[test]
    fn empty_selection_gives_zero_metrics() {
        let view = DashboardView::compute(&table(), &FilterSelection::new("North", "Tech"), 1);
        assert!(view.is_empty());
        assert_eq!(view.metrics.total_sales, 0.0);
        assert_eq!(
            view.forecast_gate,
            ForecastGate::InsufficientData { distinct_dates: 0, required: 1 }
        );
    }
}
