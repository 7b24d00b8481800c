use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use finance_tracker::{
    cli::Cli,
    tui::{self, Tui},
    ui::render,
    App, HttpApi, SystemClock, Tab,
};

const TICK: Duration = Duration::from_millis(50);

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        app.process_pending_events();
        terminal.draw(|f| render::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Network results arrive on other workers while we wait for keys.
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        } else {
            tokio::task::yield_now().await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.api_config();
    info!(base_url = %config.base_url, timeout = ?config.timeout, "starting finance-tracker");
    let api = HttpApi::new(config).context("Failed to build HTTP client")?;
    let mut app = App::new(Arc::new(api), Arc::new(SystemClock), cli.screen_options());

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    // Setup terminal
    let mut terminal = tui::init()?;

    app.activate(Tab::Transactions);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    tui::restore()?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("bye");
    Ok(())
}
