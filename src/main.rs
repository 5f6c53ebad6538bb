mod client;
mod config;
mod controller;
mod models;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use client::GitHubClient;
use config::AppConfig;
use controller::{LookupPhase, ProfileLookupController};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{env, io};
use tracing_subscriber::EnvFilter;
use tui::{
    app::App,
    event::{Event, EventHandler},
    ui,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the GitHub REST API
    #[arg(long, env("DEVRADAR_API_URL"))]
    api_url: Option<String>,

    /// Look up a single user and print the profile instead of starting the TUI
    #[arg(long)]
    user: Option<String>,

    /// Percent-encode the username before putting it in the request path
    #[arg(long)]
    encode_handle: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    // Setup logging
    let file_appender = tracing_appender::rolling::daily("logs", "devradar.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Priority: CLI flags > env vars > config.toml > defaults
    let api_url = args
        .api_url
        .or_else(|| env::var("DEVRADAR_API_URL").ok())
        .unwrap_or_else(|| config.api_base_url.clone());
    let encode_handle = args.encode_handle || config.encode_handle;

    let client = GitHubClient::new(api_url, config.request_timeout(), encode_handle)?;
    let controller = ProfileLookupController::new(client);

    if let Some(handle) = args.user {
        return run_headless(controller, &handle).await;
    }

    run_tui(App::new(controller), &config).await
}

async fn run_tui(mut app: App<GitHubClient>, config: &AppConfig) -> Result<()> {
    // Setup Terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_handler = EventHandler::new(config.tick_rate(), app.controller.subscribe());

    // Main Loop
    loop {
        terminal.draw(|frame| ui::render(&app, frame))?;

        if let Some(event) = event_handler.next().await {
            match event {
                Event::Key(key) => app.handle_key(key),
                Event::Tick => app.tick(),
                Event::StateChanged => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    event_handler.stop();

    // Restore Terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

async fn run_headless(
    controller: ProfileLookupController<GitHubClient>,
    handle: &str,
) -> Result<()> {
    controller.set_query(handle);
    controller.submit_lookup(handle).await;
    let state = controller.state();

    if state.phase() == LookupPhase::Idle {
        anyhow::bail!("No username given");
    }
    if let Some(message) = state.error_message {
        anyhow::bail!(message);
    }
    if let Some(profile) = state.result {
        for line in ui::profile_lines(&profile) {
            println!("{}", line);
        }
    }

    Ok(())
}
