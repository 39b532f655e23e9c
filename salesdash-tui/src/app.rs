//! Application state — single-owner, main-thread only.
//!
//! Every control change goes through a method here that recomputes the
//! dashboard view and the forecast before returning. There is no background
//! work.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use salesdash_core::config::ForecastSettings;
use salesdash_core::filter::{selector_options, FilterField};
use salesdash_core::{CleanedTable, DashboardView, FilterSelection, ForecastGate, Selector};
use salesdash_forecast::{
    evaluate_holdout, run_gated, ErrorMetrics, ForecastHorizon, ForecastModel, ForecastOutcome,
    SeasonalTrendModel,
};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Overview,
    Trend,
    Regions,
    DiscountProfit,
    Forecast,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Trend => 1,
            Panel::Regions => 2,
            Panel::DiscountProfit => 3,
            Panel::Forecast => 4,
            Panel::Help => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Overview),
            1 => Some(Panel::Trend),
            2 => Some(Panel::Regions),
            3 => Some(Panel::DiscountProfit),
            4 => Some(Panel::Forecast),
            5 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Trend => "Sales Over Time",
            Panel::Regions => "Sales by Region",
            Panel::DiscountProfit => "Discount vs Profit",
            Panel::Forecast => "Sales Forecast",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        match self {
            Panel::Overview => Panel::Trend,
            Panel::Trend => Panel::Regions,
            Panel::Regions => Panel::DiscountProfit,
            Panel::DiscountProfit => Panel::Forecast,
            Panel::Forecast => Panel::Help,
            Panel::Help => Panel::Overview,
        }
    }

    pub fn prev(self) -> Panel {
        match self {
            Panel::Overview => Panel::Help,
            Panel::Trend => Panel::Overview,
            Panel::Regions => Panel::Trend,
            Panel::DiscountProfit => Panel::Regions,
            Panel::Forecast => Panel::DiscountProfit,
            Panel::Help => Panel::Forecast,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Forecast,
    Persistence,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Forecast => "FCST",
            ErrorCategory::Persistence => "STATE",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Open selector list: one of the two filter columns, its entries and the
/// highlighted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPicker {
    pub field: FilterField,
    pub options: Vec<String>,
    pub cursor: usize,
}

impl SelectorPicker {
    pub fn highlighted(&self) -> Option<&str> {
        self.options.get(self.cursor).map(String::as_str)
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
    Selector(SelectorPicker),
}

/// Forecast panel state.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPanelState {
    pub horizon: ForecastHorizon,
    /// `None` only when the last fit failed.
    pub outcome: Option<ForecastOutcome>,
    pub holdout: Option<ErrorMetrics>,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub table: Arc<CleanedTable>,
    pub region_options: Vec<String>,
    pub category_options: Vec<String>,
    pub selection: FilterSelection,
    pub view: DashboardView,

    // Forecast
    pub forecast: ForecastPanelState,
    pub settings: ForecastSettings,
    model: Box<dyn ForecastModel>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(table: Arc<CleanedTable>, settings: ForecastSettings, state_path: PathBuf) -> Self {
        let region_options = selector_options(&table, FilterField::Region);
        let category_options = selector_options(&table, FilterField::Category);
        let selection = FilterSelection::all();
        let view = DashboardView::compute(&table, &selection, settings.min_distinct_dates);
        let mut app = Self {
            active_panel: Panel::Overview,
            running: true,
            table,
            region_options,
            category_options,
            selection,
            view,
            forecast: ForecastPanelState {
                horizon: ForecastHorizon::new(settings.default_horizon),
                outcome: None,
                holdout: None,
            },
            settings,
            model: Box::new(SeasonalTrendModel::new()),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            state_path,
        };
        app.refresh_forecast();
        app
    }

    /// Rebuild the dashboard view and forecast for the current controls.
    pub fn recompute(&mut self) {
        self.view = DashboardView::compute(
            &self.table,
            &self.selection,
            self.settings.min_distinct_dates,
        );
        self.refresh_forecast();
    }

    fn refresh_forecast(&mut self) {
        self.forecast.holdout = match &self.view.forecast_gate {
            ForecastGate::Ready(input) => {
                evaluate_holdout(self.model.as_mut(), &input.rows, self.settings.holdout_days).ok()
            }
            ForecastGate::InsufficientData { .. } => None,
        };

        match run_gated(&self.view.forecast_gate, self.forecast.horizon, self.model.as_mut()) {
            Ok(outcome) => self.forecast.outcome = Some(outcome),
            Err(e) => {
                self.forecast.outcome = None;
                self.push_error(
                    ErrorCategory::Forecast,
                    format!("Forecast failed: {e}"),
                    format!("{} / {}", self.selection.region, self.selection.category),
                );
            }
        }
    }

    pub fn options(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Region => &self.region_options,
            FilterField::Category => &self.category_options,
        }
    }

    pub fn selector(&self, field: FilterField) -> &Selector {
        match field {
            FilterField::Region => &self.selection.region,
            FilterField::Category => &self.selection.category,
        }
    }

    /// Open the selector list with the current value highlighted.
    pub fn open_selector(&mut self, field: FilterField) {
        let options = self.options(field).to_vec();
        let current = self.selector(field).label().to_string();
        let cursor = options.iter().position(|o| *o == current).unwrap_or(0);
        self.overlay = Overlay::Selector(SelectorPicker {
            field,
            options,
            cursor,
        });
    }

    pub fn select(&mut self, field: FilterField, value: Selector) {
        match field {
            FilterField::Region => self.selection.region = value,
            FilterField::Category => self.selection.category = value,
        }
        self.recompute();
        self.set_status(format!(
            "{}: {} ({} orders)",
            field.label(),
            self.selector(field),
            self.view.metrics.order_count
        ));
    }

    /// Restore a saved selection. A value no longer present in the data
    /// falls back to "All".
    pub fn restore_selection(&mut self, region: Selector, category: Selector) {
        let region = self.validated(FilterField::Region, region);
        let category = self.validated(FilterField::Category, category);
        self.selection = FilterSelection::new(region, category);
    }

    fn validated(&mut self, field: FilterField, value: Selector) -> Selector {
        match &value {
            Selector::Only(v) if !self.options(field).contains(v) => {
                warn!(field = field.label(), value = %v, "saved selector not in data; using All");
                self.set_warning(format!("{} '{v}' not found; showing All", field.label()));
                Selector::All
            }
            _ => value,
        }
    }

    pub fn set_horizon(&mut self, horizon: ForecastHorizon) {
        if horizon != self.forecast.horizon {
            self.forecast.horizon = horizon;
            self.recompute();
        }
    }

    pub fn step_horizon(&mut self, delta: i32) {
        self.set_horizon(self.forecast.horizon.step(delta));
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
