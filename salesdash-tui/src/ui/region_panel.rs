//! Panel 3 — Sales by Region: one bar per region, totals listed underneath.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Paragraph};
use ratatui::Frame;

use salesdash_core::format::format_money;

use crate::app::AppState;
use crate::theme;
use crate::ui::render_no_data;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let by_region = &app.view.sales_by_region;
    if by_region.is_empty() {
        render_no_data(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(by_region.len() as u16 + 1),
        ])
        .split(area);

    let bars: Vec<Bar> = by_region
        .iter()
        .map(|(region, sales)| {
            Bar::default()
                .label(Line::from(region.as_str()))
                // Negative totals are possible only with negative sales rows.
                .value(sales.max(0.0).round() as u64)
                .text_value(compact(*sales))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(theme::accent_bold().fg(theme::TEXT_PRIMARY))
        })
        .collect();

    let count = bars.len() as u16;
    let bar_width = (chunks[0].width.saturating_sub(count) / count.max(1)).clamp(3, 20);

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .label_style(theme::muted());
    f.render_widget(chart, chunks[0]);

    let lines: Vec<Line> = std::iter::once(Line::from(""))
        .chain(by_region.iter().map(|(region, sales)| {
            Line::from(vec![
                Span::styled(format!("  {:>16}: ", region), theme::muted()),
                Span::styled(format_money(*sales), theme::accent()),
            ])
        }))
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[1]);
}

/// Short bar label: `1.2M`, `34.5K`, `980`.
fn compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}
