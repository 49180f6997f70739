//! Terminal UI for the fortune wheel.

#![warn(missing_docs)]

mod app;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{error, info, instrument};

use crate::orchestrator::{SpinOrchestrator, WheelCommand, WheelEvent};
use crate::pool::CandidatePool;
use crate::settings::WheelSettings;
use app::App;

/// Runs the interactive wheel.
pub async fn run_tui(candidates: Vec<String>, settings: WheelSettings) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("fortune_wheel_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting fortune wheel TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut pool = CandidatePool::new();
    pool.add(candidates);
    let pool = Arc::new(Mutex::new(pool));

    // Channels for communication: engine events out, UI commands in.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let divisions = *settings.divisions();
    let mut orchestrator = SpinOrchestrator::new(Arc::clone(&pool), settings, event_tx);
    let orchestrator_task = tokio::spawn(async move { orchestrator.run(command_rx).await });

    let app = App::new(pool, divisions);
    let res = run_wheel(&mut terminal, app, command_tx, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // The command sender is gone, so the orchestrator loop winds down.
    let _ = orchestrator_task.await;

    if let Err(err) = res {
        error!(error = ?err, "Wheel loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Event loop: drain engine events, draw, translate key presses into
/// commands.
#[instrument(skip_all)]
async fn run_wheel<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    commands: mpsc::UnboundedSender<WheelCommand>,
    events: &mut mpsc::UnboundedReceiver<WheelEvent>,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    info!("Starting wheel event loop");

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll keeps pace with the animation frames while idle-waiting.
        if event::poll(Duration::from_millis(16))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    info!("User quit");
                    return Ok(());
                }
                _ => {
                    if let Some(command) = app.handle_key(key) {
                        commands.send(command)?;
                    }
                }
            }
        }
    }
}
