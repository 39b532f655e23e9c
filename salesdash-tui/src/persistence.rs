//! App state persistence — JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use salesdash_core::Selector;
use salesdash_forecast::ForecastHorizon;

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub region: Selector,
    pub category: Selector,
    /// `None` until the first save; the configured default applies.
    pub horizon: Option<ForecastHorizon>,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            region: Selector::All,
            category: Selector::All,
            horizon: None,
            active_panel: Panel::Overview,
            welcome_dismissed: false,
        }
    }
}

/// `<config dir>/salesdash/state.json`, or `./salesdash/state.json` when the
/// platform has no config dir.
pub fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("salesdash")
        .join("state.json")
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        region: app.selection.region.clone(),
        category: app.selection.category.clone(),
        horizon: Some(app.forecast.horizon),
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state and recompute once.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.restore_selection(state.region, state.category);
    if let Some(horizon) = state.horizon {
        app.forecast.horizon = horizon;
    }
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
    app.recompute();
}
