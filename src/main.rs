use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use postbrief::clipboard::SystemClipboard;
use postbrief::config::{Overrides, Settings};
use postbrief::input::{action_for_event, apply_action};
use postbrief::logging::setup_logging;
use postbrief::theme::Theme;
use postbrief::ui::{self, Screen};
use postbrief::{HttpSummarizationClient, SummaryController};

const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize a post by URL from your terminal")]
struct Cli {
    /// Base address of the summarization API
    #[arg(long)]
    api_url: Option<String>,

    /// Read settings from this file instead of the user and local config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or filter directive, e.g. "debug"
    #[arg(long)]
    log_level: Option<String>,

    /// Where to write the log
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(&Overrides {
        config_file: cli.config,
        api_url: cli.api_url,
        log_level: cli.log_level,
        log_file: cli.log_file,
    })
    .context("failed to load settings")?;

    setup_logging(&settings.log_level, settings.log_path()?.as_deref())?;
    debug!(?settings, "settings loaded");
    info!(api_url = %settings.api_url, "starting");

    let rt = Runtime::new()?;
    let client = Arc::new(HttpSummarizationClient::new(settings.api_url.clone()));
    let mut controller =
        SummaryController::new(client, Box::new(SystemClipboard::new()), rt.handle().clone());
    controller.check_health();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut controller, &settings.api_url);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("exiting");
    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut SummaryController,
    api_url: &str,
) -> anyhow::Result<()> {
    let theme = Theme::default();
    let mut tick: usize = 0;
    loop {
        controller.drain_events();
        terminal.draw(|f| {
            ui::render(f, &Screen::from_controller(controller, api_url, tick), &theme);
        })?;

        if event::poll(TICK)? {
            if let Some(action) = action_for_event(event::read()?) {
                if !apply_action(action, controller) {
                    return Ok(());
                }
            }
        } else {
            tick = tick.wrapping_add(1);
        }
    }
}
