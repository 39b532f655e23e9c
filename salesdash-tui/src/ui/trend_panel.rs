//! Panel 2 — Sales Over Time: daily sales line chart.

use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};
use ratatui::Frame;

use salesdash_core::format::format_money;

use crate::app::AppState;
use crate::theme;
use crate::ui::{padded_bounds, render_no_data};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let series = &app.view.sales_over_time;
    let Some(&(first, _)) = series.first() else {
        render_no_data(f, area);
        return;
    };
    let last = series[series.len() - 1].0;

    let data: Vec<(f64, f64)> = series
        .iter()
        .map(|(d, s)| (day_offset(first, *d), *s))
        .collect();
    let x_max = day_offset(first, last).max(1.0);
    let [y_min, y_max] = padded_bounds(series.iter().map(|(_, s)| *s));

    let dataset = Dataset::default()
        .name("Sales")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Order Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first.to_string(), theme::muted()),
                    Span::styled(last.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Sales", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format_money(y_min), theme::muted()),
                    Span::styled(format_money(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

pub(crate) fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}
