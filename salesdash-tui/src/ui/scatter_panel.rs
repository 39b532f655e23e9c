//! Panel 4 — Discount vs Profit: one point per filtered order.

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
    let points = &app.view.discount_profit;
    if points.is_empty() {
        render_no_data(f, area);
        return;
    }

    let (gains, losses): (Vec<(f64, f64)>, Vec<(f64, f64)>) =
        points.iter().copied().partition(|&(_, profit)| profit >= 0.0);
    let [x_min, x_max] = padded_bounds(points.iter().map(|(d, _)| *d));
    let [y_min, y_max] = padded_bounds(points.iter().map(|(_, p)| *p));

    let datasets = vec![
        Dataset::default()
            .name("Profit ≥ 0")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::POSITIVE))
            .graph_type(GraphType::Scatter)
            .data(&gains),
        Dataset::default()
            .name("Loss")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::NEGATIVE))
            .graph_type(GraphType::Scatter)
            .data(&losses),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Discount", theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(format!("{x_min:.2}"), theme::muted()),
                    Span::styled(format!("{x_max:.2}"), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Profit", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format_money(y_min), theme::muted()),
                    Span::styled(format_money(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
