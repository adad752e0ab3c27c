//! Line-based command input.
//!
//! Stands in for the host's buttons and shortcuts: each line read from the
//! input is parsed into an [`AppCommand`] and forwarded to the application.

use crate::{AppCommand, AppError, AppResult};

use std::{io::BufRead, panic::Location, str::FromStr};

use error_location::ErrorLocation;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

/// Forwards parsed command lines into the application's command channel.
pub struct CommandReader {
    command_tx: mpsc::Sender<AppCommand>,
}

impl CommandReader {
    /// Create a reader sending into `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Read `input` on a blocking task until it ends or the receiver is gone.
    ///
    /// End of input is forwarded as [`AppCommand::Shutdown`].
    pub fn spawn<R>(self, input: R) -> JoinHandle<AppResult<()>>
    where
        R: BufRead + Send + 'static,
    {
        tokio::task::spawn_blocking(move || self.forward(input))
    }

    /// Blocking loop behind [`spawn`](Self::spawn).
    #[track_caller]
    pub fn forward<R: BufRead>(&self, input: R) -> AppResult<()> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let command = match AppCommand::from_str(trimmed) {
                Ok(command) => command,
                Err(e) => {
                    warn!(error = %e, "Ignoring command line");
                    continue;
                }
            };

            debug!(command = ?command, "Command parsed");
            self.send(command)?;

            if command == AppCommand::Shutdown {
                return Ok(());
            }
        }

        info!("Command input closed");
        self.send(AppCommand::Shutdown)
    }

    #[track_caller]
    fn send(&self, command: AppCommand) -> AppResult<()> {
        self.command_tx
            .blocking_send(command)
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", command, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
