//! Panel 6 — Help: keyboard shortcuts and a short guide to each panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-6", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit (selection and horizon are saved)");
    lines.push(Line::from(""));

    section(&mut lines, "Filters (any panel)");
    key(&mut lines, "r", "Choose region");
    key(&mut lines, "c", "Choose category");
    key(&mut lines, "j / k  Enter", "Move in the list / apply");
    key(&mut lines, "Esc", "Close the list unchanged");
    lines.push(Line::from(""));

    section(&mut lines, "Panels 1-4");
    key(&mut lines, "Overview", "Total sales, profit, orders; monthly sales");
    key(&mut lines, "Sales Over Time", "Daily sales for the current filters");
    key(&mut lines, "Sales by Region", "Total sales per region");
    key(&mut lines, "Discount vs Profit", "One point per order");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 5 — Forecast");
    key(&mut lines, "h / l", "Horizon -1 / +1 day");
    key(&mut lines, "H / L", "Horizon -30 / +30 days");
    key(
        &mut lines,
        "",
        &format!(
            "Needs {} distinct order dates; narrow filters may skip it",
            app.settings.min_distinct_dates
        ),
    );
    lines.push(Line::from(""));

    section(&mut lines, "Panel 6 — Help (this panel)");
    key(&mut lines, "e", "Open error history overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Data");
    key(&mut lines, "Source", &app.table.source().display().to_string());
    key(
        &mut lines,
        "Rows",
        &format!(
            "{} read, {} dropped during cleaning",
            app.table.stats().rows_read,
            app.table.stats().rows_dropped
        ),
    );
    if let Some((first, last)) = app.table.date_range() {
        key(&mut lines, "Dates", &format!("{first} to {last}"));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
