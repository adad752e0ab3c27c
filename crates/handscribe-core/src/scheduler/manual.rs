use crate::{ScheduleHandle, Scheduler, TickFn, scheduler::MIN_PERIOD, sync::lock};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tracing::trace;

struct ManualTask {
    handle: ScheduleHandle,
    period: Duration,
    next_due: Duration,
    tick: Arc<Mutex<TickFn>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    tasks: Vec<ManualTask>,
}

/// Deterministic [`Scheduler`] driven by an explicit virtual clock.
///
/// Nothing fires until [`advance`](Self::advance) is called. Ticks due in
/// the advanced window fire in due-time order, each exactly once per elapsed
/// period, and a tick may cancel its own or another schedule.
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<Clock>,
}

impl ManualScheduler {
    /// Scheduler with its clock at zero and no schedules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        lock(&self.clock).now
    }

    /// Number of schedules that have not been cancelled.
    pub fn active_count(&self) -> usize {
        lock(&self.clock).tasks.len()
    }

    /// Move the virtual clock forward by `by`, firing every tick that falls due.
    pub fn advance(&self, by: Duration) {
        let target = lock(&self.clock).now + by;

        loop {
            let due = {
                let mut clock = lock(&self.clock);
                let next = clock
                    .tasks
                    .iter_mut()
                    .filter(|task| task.next_due <= target)
                    .min_by_key(|task| (task.next_due, task.handle));

                match next {
                    Some(task) => {
                        let fire_at = task.next_due;
                        task.next_due += task.period;
                        let tick = Arc::clone(&task.tick);
                        clock.now = fire_at;
                        Some((fire_at, tick))
                    }
                    None => None,
                }
            };

            // The clock lock is released before the tick runs so the tick can
            // schedule or cancel.
            match due {
                Some((fire_at, tick)) => {
                    trace!(at_ms = fire_at.as_millis(), "Manual tick");
                    let mut tick = lock(&tick);
                    (*tick)();
                }
                None => break,
            }
        }

        lock(&self.clock).now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> ScheduleHandle {
        let mut clock = lock(&self.clock);
        let handle = ScheduleHandle::new(clock.next_id);
        clock.next_id += 1;

        let period = period.max(MIN_PERIOD);
        let next_due = clock.now + period;
        clock.tasks.push(ManualTask {
            handle,
            period,
            next_due,
            tick: Arc::new(Mutex::new(tick)),
        });

        handle
    }

    fn cancel(&self, handle: ScheduleHandle) {
        lock(&self.clock).tasks.retain(|task| task.handle != handle);
    }
}
