//! Handscribe: hands-free dictation surfaces sharing one recording gate.

mod app;
mod app_command;
mod command_reader;
mod config;
mod error;
mod plugin;
mod surface;
mod surface_display;
mod surface_kind;
mod surface_status;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    command_reader::CommandReader,
    error::{AppError, Result as AppResult},
    plugin::Plugin,
    surface::Surface,
    surface_display::SurfaceDisplay,
    surface_kind::SurfaceKind,
    surface_status::SurfaceStatus,
};

use crate::config::{Config, DEFAULT_LOG_FILTER};

use std::{io::BufReader, sync::Arc, time::Duration};

use handscribe_core::TokioScheduler;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// How long runtime shutdown waits for the blocking input reader.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Load the plugin on the current runtime and serve commands from stdin.
async fn run(config: Config) -> AppResult<()> {
    let scheduler = Arc::new(TokioScheduler::current()?);
    let plugin = Plugin::load(&config, scheduler)?;

    let (command_tx, command_rx) = mpsc::channel(32);
    // The reader may stay blocked on input after shutdown; the runtime
    // abandons it after SHUTDOWN_TIMEOUT.
    let _reader = CommandReader::new(command_tx).spawn(BufReader::new(std::io::stdin()));

    info!("Commands: toggle|open|close <modal|view>, status, quit");

    let app = App { plugin, command_rx };
    app.run().await
}

/// Application entry point.
fn main() {
    let config = Config::load();

    let filter = match &config {
        Ok(c) => c.logging.filter.as_str(),
        Err(_) => DEFAULT_LOG_FILTER,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // Single-threaded cooperative runtime: commands and session ticks
    // never run concurrently.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(run(config));

    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);

    if let Err(e) = result {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}
