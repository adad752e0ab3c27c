use crate::{CoreError, Scheduler, TokioScheduler};

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// WHAT: Constructing outside a runtime fails with NoRuntime
/// WHY: The app must report wiring errors instead of panicking
#[test]
fn given_no_runtime_when_creating_scheduler_then_no_runtime_error() {
    // Given: No tokio runtime on this thread

    // When: Asking for the current runtime's scheduler
    let result = TokioScheduler::current();

    // Then: Returns NoRuntime
    assert!(matches!(result, Err(CoreError::NoRuntime { .. })));
}

/// WHAT: Ticks follow the runtime clock and stop on cancel
/// WHY: Cancel must abort the task, not only flag it
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_paused_clock_when_time_advances_then_ticks_until_cancelled() {
    // Given: A one-second schedule on the test runtime
    let scheduler = TokioScheduler::current().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let handle = scheduler.schedule_repeating(
        Duration::from_secs(1),
        Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }),
    );

    // When: Three and a half seconds pass
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    // Then: Three ticks
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // And: No ticks after cancellation
    scheduler.cancel(handle);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(scheduler.active_count(), 0);
}
