use crate::{
    Observable, RandomSamples, RecordingToken, SampleSource, ScheduleHandle, Scheduler,
    SessionSnapshot, Subscription, TimerSettings, session::SessionState, sync::lock,
};

use std::{
    sync::{Arc, Mutex, Weak},
    time::Duration,
};

use tracing::{debug, info, instrument, trace};

/// State reachable from the scheduled tick.
struct TimerShared {
    token: RecordingToken,
    tick_interval: Duration,
    state: Observable<SessionState>,
    samples: Mutex<Box<dyn SampleSource>>,
}

impl TimerShared {
    /// Advance an active session by one tick. A tick that lands after the
    /// session stopped is dropped without notifying or drawing a sample.
    fn tick(&self) {
        let ticked = self.state.try_update(|state| {
            if !state.is_active {
                return Err(());
            }
            let sample = lock(&self.samples).next_sample();
            state.record_tick(self.tick_interval, sample);
            Ok(state.elapsed_seconds())
        });

        match ticked {
            Ok(elapsed_seconds) => trace!(token = %self.token, elapsed_seconds, "Session tick"),
            Err(()) => debug!(token = %self.token, "Dropped tick for inactive session"),
        }
    }
}

/// Per-surface session clock and mock sample accumulator.
///
/// Each surface owns exactly one timer. The timer trusts its owner: it does
/// not check the [`RecordingGate`](crate::RecordingGate), so callers start it
/// only after acquiring the gate and stop it before releasing.
///
/// # Thread Safety
///
/// All methods take `&self`. Ticks run on the [`Scheduler`] and only touch
/// the shared session state; cancellation goes through the scheduler's
/// cancel, never just a flag.
pub struct SessionTimer {
    shared: Arc<TimerShared>,
    scheduler: Arc<dyn Scheduler>,
    settings: TimerSettings,
    schedule: Mutex<Option<ScheduleHandle>>,
}

impl SessionTimer {
    /// Inactive timer sampling pseudo-random values in
    /// `[0, settings.sample_upper_bound())`.
    pub fn new(
        token: RecordingToken,
        scheduler: Arc<dyn Scheduler>,
        settings: TimerSettings,
    ) -> Self {
        let samples = RandomSamples::new(settings.sample_upper_bound());
        Self::with_sample_source(token, scheduler, settings, samples)
    }

    /// Inactive timer drawing samples from `samples`.
    pub fn with_sample_source(
        token: RecordingToken,
        scheduler: Arc<dyn Scheduler>,
        settings: TimerSettings,
        samples: impl SampleSource + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(TimerShared {
                token,
                tick_interval: settings.tick_interval(),
                state: Observable::new(SessionState::inactive()),
                samples: Mutex::new(Box::new(samples)),
            }),
            scheduler,
            settings,
            schedule: Mutex::new(None),
        }
    }

    /// Token of the owning surface.
    pub fn token(&self) -> &RecordingToken {
        &self.shared.token
    }

    /// Whether the timer is running.
    pub fn is_active(&self) -> bool {
        self.shared.state.read(|state| state.is_active)
    }

    /// Begin a session from `00:00`. No-op while already active.
    ///
    /// Subscribers are notified right away with the reset state, before the
    /// first tick.
    #[instrument(skip(self), fields(token = %self.shared.token))]
    pub fn start(&self) {
        let mut schedule = lock(&self.schedule);
        if schedule.is_some() || self.is_active() {
            debug!("Session already active");
            return;
        }

        let weak: Weak<TimerShared> = Arc::downgrade(&self.shared);
        let handle = self.scheduler.schedule_repeating(
            self.settings.tick_interval(),
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.tick();
                }
            }),
        );
        *schedule = Some(handle);
        drop(schedule);

        self.shared.state.update(SessionState::activate);

        info!(
            tick_interval_ms = self.settings.tick_interval().as_millis(),
            "Session started"
        );
    }

    /// Cancel the tick and reset the session. Always notifies, even when the
    /// timer was not running.
    #[instrument(skip(self), fields(token = %self.shared.token))]
    pub fn stop(&self) {
        let elapsed_seconds = self.cancel_schedule();

        self.shared.state.update(SessionState::reset);

        info!(elapsed_seconds, "Session stopped");
    }

    /// Current session state with a private copy of the samples.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared
            .state
            .read(|state| SessionSnapshot::new(&self.shared.token, state))
    }

    /// Be notified on start, on every tick and on stop.
    ///
    /// No notification is sent for the current state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let token = self.shared.token.clone();
        self.shared
            .state
            .subscribe(move |state: &SessionState| callback(&SessionSnapshot::new(&token, state)))
    }

    /// Stop without notifying and drop every subscriber.
    ///
    /// Called when the owning surface closes; repeated calls are harmless.
    #[instrument(skip(self), fields(token = %self.shared.token))]
    pub fn teardown(&self) {
        self.cancel_schedule();
        self.shared.state.clear_subscribers();
        self.shared.state.set_silently(SessionState::inactive());
        debug!("Session timer torn down");
    }

    /// Cancel the pending tick, returning the elapsed seconds at that moment.
    fn cancel_schedule(&self) -> u64 {
        if let Some(handle) = lock(&self.schedule).take() {
            self.scheduler.cancel(handle);
        }
        self.shared.state.read(|state| state.elapsed_seconds())
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.schedule).take() {
            self.scheduler.cancel(handle);
        }
    }
}
