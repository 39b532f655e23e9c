//! Top-level UI layout — six-panel frame with filter header and status bar.

pub mod forecast_panel;
pub mod help_panel;
pub mod overlays;
pub mod overview_panel;
pub mod region_panel;
pub mod scatter_panel;
pub mod status_bar;
pub mod trend_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: filter header + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_filters(f, chunks[0], app);
    draw_panel(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, chunks[1]),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::Selector(picker) => overlays::render_selector(f, chunks[1], picker),
        Overlay::None => {}
    }
}

/// One-line sidebar substitute: active region and category.
fn render_filters(f: &mut Frame, area: Rect, app: &AppState) {
    let line = Line::from(vec![
        Span::styled(" Region ", theme::muted()),
        Span::styled(app.selection.region.label(), theme::accent_bold()),
        Span::styled(" [r]", theme::muted()),
        Span::raw("   "),
        Span::styled("Category ", theme::muted()),
        Span::styled(app.selection.category.label(), theme::accent_bold()),
        Span::styled(" [c]", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Overview => overview_panel::render(f, inner, app),
        Panel::Trend => trend_panel::render(f, inner, app),
        Panel::Regions => region_panel::render(f, inner, app),
        Panel::DiscountProfit => scatter_panel::render(f, inner, app),
        Panel::Forecast => forecast_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Placeholder for a chart with nothing to plot.
pub(crate) fn render_no_data(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No orders match the current filters.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "Press r or c to change the selection.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// `(min, max)` padded by 5 % of the span, never zero-width.
pub(crate) fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if max - min < 1e-9 {
        return [min - 1.0, max + 1.0];
    }
    let padding = (max - min) * 0.05;
    [min - padding, max + padding]
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_range() {
        let [lo, hi] = padded_bounds([0.0, 100.0].into_iter());
        assert_eq!(lo, -5.0);
        assert_eq!(hi, 105.0);
    }

    #[test]
    fn flat_or_empty_bounds_are_not_degenerate() {
        assert_eq!(padded_bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(padded_bounds([7.0, 7.0].into_iter()), [6.0, 8.0]);
    }
}
