//! Panel 5 — Sales Forecast: horizon slider, then either the forecast chart
//! or the insufficient-data warning.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use salesdash_core::config::{HORIZON_MAX_DAYS, HORIZON_MIN_DAYS};
use salesdash_core::format::format_money;
use salesdash_forecast::{Forecast, ForecastOutcome, INSUFFICIENT_DATA_MESSAGE};

use crate::app::AppState;
use crate::theme;
use crate::ui::padded_bounds;
use crate::ui::trend_panel::day_offset;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_slider(f, chunks[0], app);

    match &app.forecast.outcome {
        Some(ForecastOutcome::Forecast(forecast)) => render_forecast(f, chunks[1], app, forecast),
        Some(ForecastOutcome::Skipped { distinct_dates, required }) => {
            render_warning(f, chunks[1], *distinct_dates, *required)
        }
        None => {
            let text = Paragraph::new(Span::styled(
                "Forecast unavailable; see the error history (6, then e).",
                theme::negative(),
            ));
            f.render_widget(text, chunks[1]);
        }
    }
}

fn render_slider(f: &mut Frame, area: Rect, app: &AppState) {
    let horizon = app.forecast.horizon;
    let bar_width: usize = 40;
    let filled = (horizon.fraction() * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    let lines = vec![
        Line::from(vec![
            Span::styled("Forecast Days: ", theme::muted()),
            Span::styled(format!("{HORIZON_MIN_DAYS} "), theme::muted()),
            Span::styled(bar, theme::accent()),
            Span::styled(format!(" {HORIZON_MAX_DAYS}  "), theme::muted()),
            Span::styled(horizon.days().to_string(), theme::accent_bold()),
        ]),
        Line::from(Span::styled(
            "[h/l] ±1 day  [H/L] ±30 days",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_warning(f: &mut Frame, area: Rect, distinct_dates: usize, required: usize) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(INSUFFICIENT_DATA_MESSAGE, theme::warning())),
        Line::from(""),
        Line::from(Span::styled(
            format!("The current filters cover {distinct_dates} distinct dates; {required} are needed."),
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_forecast(f: &mut Frame, area: Rect, app: &AppState, forecast: &Forecast) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let (Some(first), Some(last)) = (forecast.points.first(), forecast.points.last()) else {
        return;
    };
    let origin = first.ds;

    let actual: Vec<(f64, f64)> = app
        .view
        .sales_over_time
        .iter()
        .map(|(d, s)| (day_offset(origin, *d), *s))
        .collect();
    let fitted: Vec<(f64, f64)> = forecast
        .points
        .iter()
        .map(|p| (day_offset(origin, p.ds), p.yhat))
        .collect();
    let upper: Vec<(f64, f64)> = forecast
        .future()
        .map(|p| (day_offset(origin, p.ds), p.yhat_upper))
        .collect();
    let lower: Vec<(f64, f64)> = forecast
        .future()
        .map(|p| (day_offset(origin, p.ds), p.yhat_lower))
        .collect();

    let x_max = day_offset(origin, last.ds).max(1.0);
    let [y_min, y_max] = padded_bounds(
        actual
            .iter()
            .chain(&upper)
            .chain(&lower)
            .chain(&fitted)
            .map(|(_, y)| *y),
    );

    let datasets = vec![
        Dataset::default()
            .name("Actual")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&actual),
        Dataset::default()
            .name(format!("Forecast ({})", forecast.model))
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&fitted),
        Dataset::default()
            .name("80% interval")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::WARNING))
            .graph_type(GraphType::Scatter)
            .data(&upper),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::WARNING))
            .graph_type(GraphType::Scatter)
            .data(&lower),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(origin.to_string(), theme::muted()),
                    Span::styled(last.ds.to_string(), theme::muted()),
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
    f.render_widget(chart, chunks[0]);

    let caption = match &app.forecast.holdout {
        Some(m) => Line::from(vec![
            Span::styled(
                format!("Holdout ({} days) MAE: ", m.holdout),
                theme::muted(),
            ),
            Span::styled(format_money(m.mae), theme::accent()),
            Span::styled(format!("  RMSE: {}", format_money(m.rmse)), theme::muted()),
            Span::styled(
                match m.mape {
                    Some(mape) => format!("  MAPE: {mape:.1}%"),
                    None => "  MAPE: n/a".to_string(),
                },
                theme::muted(),
            ),
        ]),
        None => Line::from(Span::styled(
            "Not enough history for a holdout evaluation.",
            theme::muted(),
        )),
    };
    f.render_widget(Paragraph::new(caption), chunks[1]);
}
