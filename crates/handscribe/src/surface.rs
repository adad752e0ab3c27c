//! A UI surface that can record: the modal or the workspace view.
//!
//! Each surface owns one session timer and a unique token, and shares the
//! plugin's recording gate. Its display is driven entirely by gate and timer
//! notifications.

use crate::{SurfaceDisplay, SurfaceKind, SurfaceStatus, surface_display::SharedDisplay};

use handscribe_core::{
    AcquireOutcome, GateSnapshot, RecordingGate, RecordingToken, ReleaseOutcome, Scheduler,
    SessionSnapshot, SessionTimer, Subscription, TimerSettings,
};

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

/// One open recording surface.
///
/// Closing (explicitly or by drop) stops any recording, releases the gate,
/// tears the timer down and drops both subscriptions.
pub struct Surface {
    kind: SurfaceKind,
    token: RecordingToken,
    gate: Arc<RecordingGate>,
    timer: SessionTimer,
    display: SharedDisplay,
    subscriptions: Vec<Subscription>,
    closed: bool,
}

impl Surface {
    /// Open a surface with a fresh token, subscribed to `gate` and to its own
    /// timer.
    #[instrument(skip(gate, scheduler, settings))]
    pub fn open(
        kind: SurfaceKind,
        gate: Arc<RecordingGate>,
        scheduler: Arc<dyn Scheduler>,
        settings: TimerSettings,
    ) -> Self {
        let token = RecordingToken::generate(kind.label());
        let timer = SessionTimer::new(token.clone(), scheduler, settings);

        // Subscriptions never replay, so the initial state is read here.
        let display = SharedDisplay::new(SurfaceDisplay::initial(&token, &gate.snapshot()));

        let gate_subscription = {
            let display = display.clone();
            let token = token.clone();
            gate.subscribe(move |snapshot: &GateSnapshot| {
                display.update(|shown| shown.apply_gate(&token, snapshot));
                debug!(surface = %kind, held = snapshot.is_held, "Gate changed");
            })
        };

        let timer_subscription = {
            let display = display.clone();
            timer.subscribe(move |snapshot: &SessionSnapshot| {
                display.update(|shown| shown.apply_session(snapshot));
                debug!(
                    surface = %kind,
                    duration = %snapshot.formatted_duration,
                    samples = %snapshot.formatted_samples,
                    "Session updated"
                );
            })
        };

        info!(surface = %kind, token = %token, "Surface opened");

        Self {
            kind,
            token,
            gate,
            timer,
            display,
            subscriptions: vec![gate_subscription, timer_subscription],
            closed: false,
        }
    }

    /// Which surface this is.
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// This surface's gate token.
    pub fn token(&self) -> &RecordingToken {
        &self.token
    }

    /// Whether this surface's session is running.
    pub fn is_recording(&self) -> bool {
        self.timer.is_active()
    }

    /// Current display.
    pub fn display(&self) -> SurfaceDisplay {
        self.display.get()
    }

    /// Current session state.
    pub fn session(&self) -> SessionSnapshot {
        self.timer.snapshot()
    }

    /// Acquire the gate, then start the session timer.
    ///
    /// When another surface is recording nothing starts and the display
    /// shows the blocked status.
    #[instrument(skip(self), fields(surface = %self.kind))]
    pub fn start_recording(&self) -> AcquireOutcome {
        let outcome = self.gate.try_acquire(&self.token);

        match outcome {
            AcquireOutcome::Acquired => {
                self.timer.start();
                info!("Recording started");
            }
            AcquireOutcome::AlreadyHeld { by_caller: true } => {
                // Gate held by our own token with the timer stopped.
                self.timer.start();
                warn!("Gate already held by this surface");
            }
            AcquireOutcome::AlreadyHeld { by_caller: false } => {
                self.display
                    .update(|shown| shown.status = SurfaceStatus::Blocked);
                info!("Recording in progress elsewhere");
            }
        }

        outcome
    }

    /// Stop the session timer, then release the gate.
    #[instrument(skip(self), fields(surface = %self.kind))]
    pub fn stop_recording(&self) -> ReleaseOutcome {
        let duration = self.session().formatted_duration;
        self.timer.stop();
        let outcome = self.gate.release(&self.token);

        info!(duration = %duration, outcome = ?outcome, "Recording stopped");

        outcome
    }

    /// Start when idle, stop when recording. Returns the resulting status.
    pub fn toggle_recording(&self) -> SurfaceStatus {
        if self.is_recording() {
            let _ = self.stop_recording();
        } else {
            let _ = self.start_recording();
        }
        self.display.get().status
    }

    /// Stop any recording and detach from the gate and timer. Idempotent.
    #[instrument(skip(self), fields(surface = %self.kind))]
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        if self.is_recording() || self.gate.is_held_by(&self.token) {
            let _ = self.stop_recording();
        }

        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.timer.teardown();
        self.closed = true;

        info!("Surface closed");
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.close();
    }
}
