//! Overlay widgets — welcome, error history, filter selector.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, SelectorPicker};
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Sales Dashboard ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Press r / c to filter by region or category",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press 1-6 or Tab to switch panels",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. On panel 5, h/l and H/L set the forecast horizon",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Region or category picker.
pub fn render_selector(f: &mut Frame, area: Rect, picker: &SelectorPicker) {
    let popup = centered_rect(40, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(
            " {} [Enter]apply [Esc]cancel ",
            picker.field.label()
        ))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    // Keep the cursor in view.
    let height = (inner.height as usize).max(1);
    let start = picker.cursor.saturating_sub(height - 1);

    let lines: Vec<Line> = picker
        .options
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, option)| {
            if i == picker.cursor {
                Line::from(vec![
                    Span::styled("> ", theme::accent_bold()),
                    Span::styled(option.as_str(), theme::accent_bold()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(option.as_str(), theme::text()),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
