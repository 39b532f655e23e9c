//! Parrot/neon theme tokens for the SalesDash TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (primary highlights, focus, sales series)
//! - **Positive**: Neon green (profit, success)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (alerts, forecast interval)
//! - **Neutral**: Cool purple (secondary info, forecast line)
//! - **Muted**: Steel blue (hints, axes, secondary text)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Profit is green at or above zero, pink below.
pub fn metric_color(value: f64) -> Style {
    if value >= 0.0 {
        positive()
    } else {
        negative()
    }
}
