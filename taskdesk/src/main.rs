//! `TaskDesk`: create caseworker tasks from the terminal.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdesk/config.toml`).
//!
//! ```bash
//! # Against a backend on the default address
//! cargo run --bin taskdesk
//!
//! # Against another backend
//! cargo run --bin taskdesk -- --api-url https://tasks.example.test/api
//!
//! # Or via environment variable
//! TASKDESK_API_URL=http://127.0.0.1:8000/api cargo run --bin taskdesk
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdesk::app::App;
use taskdesk::config::{CliArgs, ClientConfig};
use taskdesk::gateway::HttpGateway;
use taskdesk::net::{self, DEFAULT_CHANNEL_CAPACITY, SubmitCommand, SubmitEvent};
use taskdesk::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Logs go to a file; the terminal belongs to the UI.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, "taskdesk starting");

    let gateway = match HttpGateway::new(&config.to_gateway_config()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error creating HTTP client: {e}");
            std::process::exit(1);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, gateway, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdesk exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdesk.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    gateway: HttpGateway,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(gateway.endpoint());
    let (cmd_tx, mut evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        drain_submit_events(&mut app, &mut evt_rx);

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(request) = app.handle_key_event(key) {
                if let Err(e) = cmd_tx.try_send(SubmitCommand::Create(request)) {
                    tracing::warn!(error = %e, "could not hand request to submission worker");
                    app.dispatch_failed();
                }
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(SubmitCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `SubmitEvent`s and apply them to the app.
fn drain_submit_events(app: &mut App, rx: &mut mpsc::Receiver<SubmitEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            SubmitEvent::Finished(outcome) => app.apply_outcome(outcome),
        }
    }
}
