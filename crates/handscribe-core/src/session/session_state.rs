use crate::{RecordingToken, format_duration, format_samples};

use std::time::Duration;

/// Local state of one surface's session.
///
/// Whenever `is_active` is false, `elapsed` is zero and `samples` is empty;
/// `reset` is the only way back to inactive.
#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub(crate) is_active: bool,
    pub(crate) elapsed: Duration,
    pub(crate) samples: Vec<u32>,
}

impl SessionState {
    pub(crate) fn inactive() -> Self {
        Self {
            is_active: false,
            elapsed: Duration::ZERO,
            samples: Vec::new(),
        }
    }

    pub(crate) fn activate(&mut self) {
        self.is_active = true;
        self.elapsed = Duration::ZERO;
        self.samples.clear();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::inactive();
    }

    /// One tick: `interval` more elapsed time and one more sample.
    pub(crate) fn record_tick(&mut self, interval: Duration, sample: u32) {
        self.elapsed += interval;
        self.samples.push(sample);
    }

    /// Whole seconds elapsed; sub-second remainders are truncated.
    pub(crate) fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Read-only view of a session, handed to subscribers and returned by
/// [`SessionTimer::snapshot`](crate::SessionTimer::snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Token of the surface owning the session.
    pub token: RecordingToken,
    /// Whether the timer is running.
    pub is_active: bool,
    /// Whole seconds since the session started.
    pub elapsed_seconds: u64,
    /// Copy of the mock samples, one per tick.
    pub samples: Vec<u32>,
    /// `elapsed_seconds` as `MM:SS`.
    pub formatted_duration: String,
    /// Samples as `"n... n..."`.
    pub formatted_samples: String,
}

impl SessionSnapshot {
    pub(crate) fn new(token: &RecordingToken, state: &SessionState) -> Self {
        Self {
            token: token.clone(),
            is_active: state.is_active,
            elapsed_seconds: state.elapsed_seconds(),
            samples: state.samples.clone(),
            formatted_duration: format_duration(state.elapsed_seconds()),
            formatted_samples: format_samples(&state.samples),
        }
    }
}
