//! Bottom status bar — panel hints, then the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Overview 2:Trend 3:Regions 4:Discount 5:Forecast 6:Help",
        theme::muted(),
    ));

    spans.push(Span::raw(" | "));

    match &app.status_message {
        Some((msg, level)) => {
            let style = match level {
                StatusLevel::Info => theme::accent(),
                StatusLevel::Warning => theme::warning(),
                StatusLevel::Error => theme::negative(),
            };
            spans.push(Span::styled(msg.as_str(), style));
        }
        None => spans.push(Span::styled(
            format!("{} orders", app.view.metrics.order_count),
            theme::muted(),
        )),
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
