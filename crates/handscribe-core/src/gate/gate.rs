use crate::{
    AcquireOutcome, GateSnapshot, Observable, RecordingToken, ReleaseOutcome, Subscription,
    gate::GateState,
};

use tracing::{debug, info, instrument};

/// Single-writer gate deciding which surface may record.
///
/// One gate is created at plugin load and shared (`Arc<RecordingGate>`) with
/// every surface. At most one token holds it at a time; only that token can
/// release it. Every successful acquire or release notifies subscribers
/// with a [`GateSnapshot`]; rejected operations change nothing and notify
/// no one.
///
/// The gate does not know about session timers. Callers acquire before
/// starting their timer and stop their timer before releasing.
pub struct RecordingGate {
    state: Observable<GateState>,
}

impl RecordingGate {
    /// Create an idle gate with no subscribers.
    pub fn new() -> Self {
        Self {
            state: Observable::new(GateState::default()),
        }
    }

    /// Grant recording rights to `token` if nobody holds the gate.
    ///
    /// Fails while the gate is held by anyone, including `token` itself.
    #[instrument(skip(self, token), fields(token = %token))]
    pub fn try_acquire(&self, token: &RecordingToken) -> AcquireOutcome {
        let outcome = self.state.try_update(|state| {
            if let Some(holder) = state.holder() {
                return Err(AcquireOutcome::AlreadyHeld {
                    by_caller: holder == token,
                });
            }
            state.hold(token.clone());
            Ok(AcquireOutcome::Acquired)
        });

        match outcome {
            Ok(acquired) => {
                info!("Recording gate acquired");
                acquired
            }
            Err(rejected) => {
                debug!(outcome = ?rejected, "Recording gate acquisition rejected");
                rejected
            }
        }
    }

    /// Return the gate to idle if `token` is the current holder.
    ///
    /// Releasing with a foreign token, or while idle, is ignored without
    /// notifying anyone.
    #[instrument(skip(self, token), fields(token = %token))]
    pub fn release(&self, token: &RecordingToken) -> ReleaseOutcome {
        let outcome = self.state.try_update(|state| {
            match state.holder().map(|holder| holder == token) {
                Some(true) => {
                    state.clear();
                    Ok(ReleaseOutcome::Released)
                }
                Some(false) => Err(ReleaseOutcome::NotOwner),
                None => Err(ReleaseOutcome::NotHeld),
            }
        });

        match outcome {
            Ok(released) => {
                info!("Recording gate released");
                released
            }
            Err(ignored) => {
                debug!(outcome = ?ignored, "Recording gate release ignored");
                ignored
            }
        }
    }

    /// Whether any token holds the gate.
    pub fn is_held(&self) -> bool {
        self.state.read(|state| state.holder().is_some())
    }

    /// Whether `token` holds the gate.
    pub fn is_held_by(&self, token: &RecordingToken) -> bool {
        self.state.read(|state| state.holder() == Some(token))
    }

    /// Token currently holding the gate.
    pub fn holder(&self) -> Option<RecordingToken> {
        self.state.read(|state| state.holder().cloned())
    }

    /// Current state, in the same shape subscribers receive.
    pub fn snapshot(&self) -> GateSnapshot {
        self.state.read(|state| GateSnapshot::from(state))
    }

    /// Be notified after every successful acquire and release.
    ///
    /// No notification is sent for the current state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&GateSnapshot) + Send + Sync + 'static,
    {
        self.state
            .subscribe(move |state: &GateState| callback(&GateSnapshot::from(state)))
    }

    /// Force the gate idle and drop every subscriber, without notifying.
    ///
    /// Called once from the plugin's unload path; repeated calls are harmless.
    #[instrument(skip(self))]
    pub fn shutdown(&self) {
        self.state.clear_subscribers();
        self.state.set_silently(GateState::default());
        info!("Recording gate shut down");
    }
}

impl Default for RecordingGate {
    fn default() -> Self {
        Self::new()
    }
}
