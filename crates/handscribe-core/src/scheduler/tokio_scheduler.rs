use crate::{
    CoreError, CoreResult, ScheduleHandle, Scheduler, TickFn, scheduler::MIN_PERIOD, sync::lock,
};

use std::{
    collections::HashMap,
    panic::Location,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, instrument};

/// [`Scheduler`] running each schedule as a task on a tokio runtime.
///
/// Cancellation aborts the task, so a tick that has not started yet never
/// runs. Missed ticks are delayed, not replayed.
pub struct TokioScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<ScheduleHandle, JoinHandle<()>>>,
}

impl TokioScheduler {
    /// Schedule onto the given runtime.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(0),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule onto the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns error if called outside of a tokio runtime.
    #[track_caller]
    pub fn current() -> CoreResult<Self> {
        let runtime = Handle::try_current().map_err(|e| CoreError::NoRuntime {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self::new(runtime))
    }

    /// Number of schedules that have not been cancelled.
    pub fn active_count(&self) -> usize {
        lock(&self.tasks).len()
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self, tick))]
    fn schedule_repeating(&self, period: Duration, mut tick: TickFn) -> ScheduleHandle {
        let handle = ScheduleHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let period = period.max(MIN_PERIOD);

        let task = self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });

        lock(&self.tasks).insert(handle, task);
        debug!(handle = handle.id(), period_ms = period.as_millis(), "Schedule registered");

        handle
    }

    #[instrument(skip(self))]
    fn cancel(&self, handle: ScheduleHandle) {
        if let Some(task) = lock(&self.tasks).remove(&handle) {
            task.abort();
            debug!(handle = handle.id(), "Schedule cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in lock(&self.tasks).drain() {
            task.abort();
        }
    }
}
