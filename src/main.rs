mod catalog;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod player;
mod session;
mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{watch, Mutex};

use catalog::CatalogClient;
use config::Config;
use controller::AppController;
use model::AppModel;
use player::{PollOutcome, StatusPoller, DEFAULT_POLL_INTERVAL};
use session::Session;
use view::AppView;

/// Browse a Navidrome library and play it through mpv
#[derive(Parser)]
#[command(name = "navitui", version, about)]
struct Cli {
    /// Path of mpv's JSON IPC socket (overrides NAVITUI_MPV_SOCKET)
    #[arg(long, global = true, value_name = "PATH")]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the music server is reachable and the credentials work
    Ping,
    /// Print one page of albums, alphabetical by artist
    Albums {
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let mut config = Config::from_env();
    if let Some(socket) = cli.socket {
        config = config.with_socket_path(socket);
    }

    match cli.command {
        Some(Command::Ping) => ping(&config).await,
        Some(Command::Albums { offset }) => print_albums(&config, offset).await,
        None => run_tui(config).await,
    }
}

async fn ping(config: &Config) -> Result<()> {
    let client = CatalogClient::new(&config.server).context("invalid server configuration")?;
    client.ping().await.context("music server not reachable")?;
    println!("{}: ok", config.server.base_url);
    Ok(())
}

async fn print_albums(config: &Config, offset: usize) -> Result<()> {
    let client = CatalogClient::new(&config.server).context("invalid server configuration")?;
    let albums = client.album_list(offset).await.context("failed to list albums")?;
    for album in &albums {
        println!("{}\t{}\t{}", album.id, album.artist, album.name);
    }
    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    tracing::info!("=== navitui starting ===");

    // Load before touching the terminal so failures print normally
    println!("Loading library from {}...", config.server.base_url);
    let session = Arc::new(Session::start(&config).await?);

    let poll_session = session.clone();
    let poller = StatusPoller::spawn(DEFAULT_POLL_INTERVAL, move || {
        let session = poll_session.clone();
        async move { session.status().await }
    });

    let model = Arc::new(Mutex::new(AppModel::new(session.clone())));
    let controller = AppController::new(model.clone(), session);
    controller.apply_poll_outcome(&poller.latest()).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, poller.subscribe()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    drop(poller);

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
        return Err(err.into());
    }

    tracing::info!("navitui shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    mut outcomes: watch::Receiver<PollOutcome>,
) -> io::Result<()> {
    loop {
        if outcomes.has_changed().unwrap_or(false) {
            let outcome = outcomes.borrow_and_update().clone();
            controller.apply_poll_outcome(&outcome).await;
        }

        let should_quit = {
            let mut model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors();

            terminal.draw(|f| AppView::render(f, &model_guard))?;
            model_guard.should_quit()
        };

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Errors are surfaced through the model
                let _ = controller.handle_key_event(key).await;
            }
        }
    }

    Ok(())
}
