//! Panel 1 — Overview: headline metrics, dataset info, monthly sales.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use salesdash_core::format::{format_count, format_money};

use crate::app::AppState;
use crate::theme;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(1)])
        .split(area);

    render_metrics(f, chunks[0], app);
    render_monthly(f, chunks[1], app);
}

fn render_metrics(f: &mut Frame, area: Rect, app: &AppState) {
    let m = &app.view.metrics;
    let stats = app.table.stats();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Key Metrics", theme::accent_bold())));
    metric(&mut lines, "Total Sales", format_money(m.total_sales), theme::accent());
    metric(
        &mut lines,
        "Total Profit",
        format_money(m.total_profit),
        theme::metric_color(m.total_profit),
    );
    metric(&mut lines, "Total Orders", format_count(m.order_count), theme::accent());
    lines.push(Line::from(""));

    let range = match (app.view.sales_over_time.first(), app.view.sales_over_time.last()) {
        (Some((first, _)), Some((last, _))) => format!("{first} → {last}"),
        _ => "—".to_string(),
    };
    metric(&mut lines, "Date range", range, theme::muted());
    metric(
        &mut lines,
        "Rows kept / dropped",
        format!(
            "{} / {}",
            format_count(stats.rows_kept()),
            format_count(stats.rows_dropped)
        ),
        theme::muted(),
    );

    f.render_widget(Paragraph::new(lines), area);
}

fn render_monthly(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled("Monthly Sales", theme::accent_bold())));

    let months = &app.view.sales_by_month;
    if months.is_empty() {
        lines.push(Line::from(Span::styled("  no orders", theme::muted())));
    }

    // Most recent months that fit.
    let room = (area.height as usize).saturating_sub(1);
    let skip = months.len().saturating_sub(room);
    let max = months.iter().map(|(_, s)| *s).fold(0.0, f64::max);
    let bar_width: usize = 30;

    for ((year, month), sales) in months.iter().skip(skip) {
        let filled = if max > 0.0 {
            ((sales / max).max(0.0) * bar_width as f64).round() as usize
        } else {
            0
        };
        let name = MONTH_NAMES
            .get((*month as usize).wrapping_sub(1))
            .copied()
            .unwrap_or("???");
        lines.push(Line::from(vec![
            Span::styled(format!("  {name} {year}  "), theme::muted()),
            Span::styled("█".repeat(filled), theme::accent()),
            Span::styled(format!(" {}", format_money(*sales)), theme::text()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn metric<'a>(lines: &mut Vec<Line<'a>>, label: &str, value: String, style: Style) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}: ", label), theme::muted()),
        Span::styled(value, style),
    ]));
}
