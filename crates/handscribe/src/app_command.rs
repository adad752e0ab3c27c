use crate::{AppError, SurfaceKind};

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Commands sent from the input forwarder to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Start recording on a surface, or stop it if it is recording.
    ToggleRecording {
        /// Surface whose button was pressed.
        surface: SurfaceKind,
    },
    /// Open a surface if it is not open yet.
    OpenSurface {
        /// Surface to open.
        surface: SurfaceKind,
    },
    /// Close a surface, stopping its recording first.
    CloseSurface {
        /// Surface to close.
        surface: SurfaceKind,
    },
    /// Log the state of every open surface and the gate.
    Status,
    /// Request application shutdown.
    Shutdown,
}

impl FromStr for AppCommand {
    type Err = AppError;

    /// Parse `toggle|open|close <modal|view>`, `status` or `quit`.
    #[track_caller]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let caller = Location::caller();
        let unknown = || AppError::UnknownCommand {
            input: line.to_string(),
            location: ErrorLocation::from(caller),
        };

        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(unknown)?.to_ascii_lowercase();
        let surface = words.next().map(SurfaceKind::from_str);
        if words.next().is_some() {
            return Err(unknown());
        }

        match (verb.as_str(), surface) {
            ("toggle", Some(Ok(surface))) => Ok(AppCommand::ToggleRecording { surface }),
            ("open", Some(Ok(surface))) => Ok(AppCommand::OpenSurface { surface }),
            ("close", Some(Ok(surface))) => Ok(AppCommand::CloseSurface { surface }),
            ("status", None) => Ok(AppCommand::Status),
            ("quit" | "exit", None) => Ok(AppCommand::Shutdown),
            _ => Err(unknown()),
        }
    }
}
