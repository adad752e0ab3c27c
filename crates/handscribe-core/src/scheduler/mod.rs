//! Repeating-callback scheduling behind a trait.
//!
//! Session timers never sleep themselves. They register a tick with a
//! [`Scheduler`] and cancel it by handle, so the same timer logic runs on a
//! tokio runtime in the application and on a virtual clock in tests.

mod manual;
mod tokio_scheduler;

pub use {manual::ManualScheduler, tokio_scheduler::TokioScheduler};

use std::time::Duration;

/// Shortest period a schedule runs at; zero periods are raised to this.
pub(crate) const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Callback run on every tick of a repeating schedule.
pub type TickFn = Box<dyn FnMut() + Send + 'static>;

/// Identifies one registered repeating callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Numeric id, unique within the scheduler that issued it.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Register and cancel repeating callbacks.
pub trait Scheduler: Send + Sync {
    /// Run `tick` every `period`, first after one full period has elapsed.
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> ScheduleHandle;

    /// Stop a schedule. No tick of `handle` starts after this returns.
    ///
    /// Cancelling an unknown or already-cancelled handle is a no-op.
    fn cancel(&self, handle: ScheduleHandle);
}
