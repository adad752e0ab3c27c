use crate::{SurfaceKind, SurfaceStatus};

use handscribe_core::{GateSnapshot, RecordingToken, SessionSnapshot};

use std::sync::{Arc, Mutex, PoisonError};

/// What a surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceDisplay {
    /// Recording status line.
    pub status: SurfaceStatus,
    /// Session duration as `MM:SS`.
    pub duration: String,
    /// Placeholder transcript.
    pub samples: String,
}

impl SurfaceDisplay {
    /// Display for a surface that has not recorded yet, given the gate state.
    pub fn initial(token: &RecordingToken, gate: &GateSnapshot) -> Self {
        let mut display = Self {
            status: SurfaceStatus::Ready,
            duration: handscribe_core::format_duration(0),
            samples: String::new(),
        };
        display.apply_gate(token, gate);
        display
    }

    /// Label of the record button.
    pub fn button_label(&self) -> &'static str {
        match self.status {
            SurfaceStatus::Recording => "Stop recording",
            SurfaceStatus::Ready | SurfaceStatus::Blocked => "Start recording",
        }
    }

    /// Whether the record button can be pressed.
    pub fn button_enabled(&self) -> bool {
        self.status != SurfaceStatus::Blocked
    }

    /// One-line rendering used for logs and `status`.
    pub fn render(&self, kind: SurfaceKind) -> String {
        let button = if self.button_enabled() {
            format!("[{}]", self.button_label())
        } else {
            format!("({})", self.button_label())
        };

        if self.samples.is_empty() {
            format!("{kind}: {} {} {button}", self.status, self.duration)
        } else {
            format!(
                "{kind}: {} {} | {} {button}",
                self.status, self.duration, self.samples
            )
        }
    }

    pub(crate) fn apply_gate(&mut self, token: &RecordingToken, gate: &GateSnapshot) {
        self.status = if gate.is_held_by(token) {
            SurfaceStatus::Recording
        } else if gate.is_held {
            SurfaceStatus::Blocked
        } else {
            SurfaceStatus::Ready
        };
    }

    pub(crate) fn apply_session(&mut self, session: &SessionSnapshot) {
        self.duration = session.formatted_duration.clone();
        self.samples = session.formatted_samples.clone();
    }
}

/// Display shared between a surface and its subscription callbacks.
#[derive(Debug, Clone)]
pub(crate) struct SharedDisplay(Arc<Mutex<SurfaceDisplay>>);

impl SharedDisplay {
    pub(crate) fn new(display: SurfaceDisplay) -> Self {
        Self(Arc::new(Mutex::new(display)))
    }

    pub(crate) fn get(&self) -> SurfaceDisplay {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut SurfaceDisplay)) {
        f(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner));
    }
}
