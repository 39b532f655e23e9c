//! Sales dashboard TUI — six-panel terminal interface with vim-style navigation.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use salesdash_core::data::load_cached;
use salesdash_core::DashboardConfig;
use salesdash_tui::{input, logging, persistence, ui, AppState};

#[derive(Parser)]
#[command(name = "salesdash-tui", about = "Interactive sales dashboard")]
struct Cli {
    /// Config file (default: ./salesdash.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Orders CSV, overriding `data_path` from the config
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let _log_guard = logging::init(&config.logging);

    // Fatal before the terminal is touched, so the error prints normally.
    let table = load_cached(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    info!(
        path = %config.data_path.display(),
        rows = table.len(),
        "dataset ready"
    );

    let state_path = persistence::default_state_path();
    let persisted = persistence::load(&state_path);

    let mut app = AppState::new(table, config.forecast.clone(), state_path.clone());
    persistence::apply(&mut app, persisted);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        warn!(path = %state_path.display(), error = %e, "could not save state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms timeout for a ~20 FPS tick
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
