//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use salesdash_core::filter::FilterField;
use salesdash_core::Selector;

use crate::app::{AppState, Overlay, Panel};

/// Slider steps for `h/l` and `H/L`.
const FINE_STEP: i32 = 1;
const COARSE_STEP: i32 = 30;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Selector(_) => {
            handle_selector_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='6') => {
            if let Some(panel) = Panel::from_index(c as usize - '1' as usize) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('r') => {
            app.open_selector(FilterField::Region);
            return;
        }
        KeyCode::Char('c') => {
            app.open_selector(FilterField::Category);
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Forecast => handle_forecast_key(app, key),
        Panel::Help => handle_help_key(app, key),
        Panel::Overview | Panel::Trend | Panel::Regions | Panel::DiscountProfit => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_selector_overlay(app: &mut AppState, key: KeyEvent) {
    let Overlay::Selector(picker) = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => picker.down(),
        KeyCode::Char('k') | KeyCode::Up => picker.up(),
        KeyCode::Enter => {
            let field = picker.field;
            let chosen = picker.highlighted().map(Selector::from);
            app.overlay = Overlay::None;
            if let Some(value) = chosen {
                if &value != app.selector(field) {
                    app.select(field, value);
                }
            }
        }
        _ => {}
    }
}

fn handle_forecast_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.step_horizon(-FINE_STEP),
        KeyCode::Char('l') | KeyCode::Right => app.step_horizon(FINE_STEP),
        KeyCode::Char('H') => app.step_horizon(-COARSE_STEP),
        KeyCode::Char('L') => app.step_horizon(COARSE_STEP),
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('e') {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}
