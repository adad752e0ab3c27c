use crate::{AppCommand, AppResult, Plugin, SurfaceKind};

use tokio::sync::mpsc;
use tracing::{error, info, instrument};

/// Main application state.
///
/// Runs on the single-threaded async runtime. Commands arrive over
/// `command_rx`; session ticks run as tasks on the same runtime, so every
/// command and every tick executes to completion before the next one.
pub struct App {
    pub(crate) plugin: Plugin,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
}

impl App {
    /// Run the main application event loop until shutdown.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Handscribe starting");

        for line in self.plugin.status() {
            info!("{line}");
        }

        loop {
            match self.command_rx.recv().await {
                Some(AppCommand::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                Some(command) => self.handle_command(command),
                None => {
                    info!("Command channel closed, shutting down");
                    break;
                }
            }
        }

        self.plugin.unload();
        info!(
            gate_held = self.plugin.gate().is_held(),
            "Handscribe shut down successfully"
        );

        Ok(())
    }

    /// Apply one command. Failures are logged; the loop keeps running.
    #[instrument(skip(self))]
    pub(crate) fn handle_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::ToggleRecording { surface } => {
                match self.plugin.toggle_recording(surface) {
                    Ok(status) => info!(surface = %surface, status = %status, "Toggled recording"),
                    Err(e) => error!(surface = %surface, error = ?e, "Failed to toggle recording"),
                }
            }
            AppCommand::OpenSurface { surface } => {
                if self.plugin.open_surface(surface) {
                    self.log_surface(surface);
                }
            }
            AppCommand::CloseSurface { surface } => {
                if let Err(e) = self.plugin.close_surface(surface) {
                    error!(surface = %surface, error = ?e, "Failed to close surface");
                }
            }
            AppCommand::Status => {
                for line in self.plugin.status() {
                    info!("{line}");
                }
            }
            AppCommand::Shutdown => self.plugin.unload(),
        }
    }

    fn log_surface(&self, kind: SurfaceKind) {
        if let Some(surface) = self.plugin.surface(kind) {
            info!("{}", surface.display().render(kind));
        }
    }
}
