mod actions;
mod api;
mod app;
mod config;
mod refresh;
mod state;
mod types;
mod ui;
mod utils;
mod validate;

#[cfg(test)]
mod testing;

use app::App;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let app = App::new()?;
    let terminal = ratatui::init();
    let app_result = app.run(terminal).await;
    ratatui::restore();
    app_result
}

/// Log to a file so the terminal UI is never overwritten
fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join("lazy-grades-tui.log");
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(log = %path.display(), "starting lazy-grades-tui");
    Ok(())
}
