use crate::{
    CoreError, ManualScheduler, RecordingGate, RecordingToken, ScheduleHandle, Scheduler,
    SessionSnapshot, SessionTimer, TickFn, TimerSettings, TokioScheduler,
};

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

const TICK: Duration = Duration::from_secs(1);

/// Scheduler that keeps ticks registered after cancel, standing in for a
/// tick already in flight when the session stops.
#[derive(Default)]
struct StickyScheduler {
    ticks: Mutex<Vec<TickFn>>,
}

impl StickyScheduler {
    #[allow(clippy::unwrap_used)]
    fn fire(&self) {
        for tick in self.ticks.lock().unwrap().iter_mut() {
            tick();
        }
    }
}

impl Scheduler for StickyScheduler {
    #[allow(clippy::unwrap_used)]
    fn schedule_repeating(&self, _period: Duration, tick: TickFn) -> ScheduleHandle {
        let mut ticks = self.ticks.lock().unwrap();
        ticks.push(tick);
        ScheduleHandle::new(ticks.len() as u64)
    }

    fn cancel(&self, _handle: ScheduleHandle) {}
}

fn manual_timer() -> (Arc<ManualScheduler>, SessionTimer) {
    let scheduler = Arc::new(ManualScheduler::new());
    let timer = SessionTimer::new(
        RecordingToken::named("A"),
        scheduler.clone(),
        TimerSettings::default(),
    );
    (scheduler, timer)
}

#[allow(clippy::unwrap_used)]
fn recording_subscriber(timer: &SessionTimer) -> Arc<Mutex<Vec<SessionSnapshot>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = timer.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.clone()));
    seen
}

/// WHAT: Three ticks produce three seconds and three samples in range
/// WHY: Each tick advances time by one and appends one sample
#[test]
fn given_started_timer_when_three_ticks_elapse_then_three_seconds_and_samples() {
    // Given: A started timer
    let (scheduler, timer) = manual_timer();
    timer.start();

    // When: Advancing three ticks
    scheduler.advance(TICK * 3);

    // Then: Three seconds, three samples below 100
    let snapshot = timer.snapshot();
    assert!(snapshot.is_active);
    assert_eq!(snapshot.elapsed_seconds, 3);
    assert_eq!(snapshot.samples.len(), 3);
    assert!(snapshot.samples.iter().all(|sample| *sample < 100));
    assert_eq!(snapshot.formatted_duration, "00:03");
}

/// WHAT: Stop resets elapsed time and samples
/// WHY: Inactive sessions always read 00:00 with no samples
#[test]
fn given_ticking_timer_when_stopped_then_reset() {
    // Given: A timer that ticked five times
    let (scheduler, timer) = manual_timer();
    timer.start();
    scheduler.advance(TICK * 5);

    // When: Stopping
    timer.stop();

    // Then: Reset and no schedule left behind
    let snapshot = timer.snapshot();
    assert!(!snapshot.is_active);
    assert_eq!(snapshot.elapsed_seconds, 0);
    assert!(snapshot.samples.is_empty());
    assert_eq!(snapshot.formatted_duration, "00:00");
    assert_eq!(snapshot.formatted_samples, "");
    assert_eq!(scheduler.active_count(), 0);

    // And: Advancing further does not tick
    scheduler.advance(TICK * 3);
    assert_eq!(timer.snapshot().elapsed_seconds, 0);
}

/// WHAT: Start notifies immediately with the reset state
/// WHY: Surfaces show 00:00 before the first tick
#[test]
#[allow(clippy::unwrap_used)]
fn given_subscriber_when_starting_then_notified_with_zero_duration() {
    // Given: A subscribed timer
    let (_scheduler, timer) = manual_timer();
    let seen = recording_subscriber(&timer);

    // When: Starting
    timer.start();

    // Then: One notification at 00:00
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_active);
    assert_eq!(seen[0].formatted_duration, "00:00");
    assert!(seen[0].samples.is_empty());
}

/// WHAT: Every tick notifies with the updated snapshot
/// WHY: Surfaces stay in sync without polling
#[test]
#[allow(clippy::unwrap_used)]
fn given_subscriber_when_ticking_then_notified_per_tick() {
    // Given: A subscribed, started timer
    let (scheduler, timer) = manual_timer();
    let seen = recording_subscriber(&timer);
    timer.start();

    // When: Two ticks, then stop
    scheduler.advance(TICK * 2);
    timer.stop();

    // Then: start, tick, tick, stop
    let seen = seen.lock().unwrap();
    let elapsed: Vec<u64> = seen.iter().map(|snapshot| snapshot.elapsed_seconds).collect();
    assert_eq!(elapsed, vec![0, 1, 2, 0]);
    assert_eq!(seen[2].samples.len(), 2);
    assert!(!seen[3].is_active);
}

/// WHAT: Starting an active timer is a no-op
/// WHY: Start is idempotent and must not restart the clock
#[test]
#[allow(clippy::unwrap_used)]
fn given_active_timer_when_starting_again_then_unchanged() {
    // Given: A timer two ticks in
    let (scheduler, timer) = manual_timer();
    timer.start();
    scheduler.advance(TICK * 2);
    let seen = recording_subscriber(&timer);

    // When: Starting again
    timer.start();

    // Then: No reset, no notification, still one schedule
    assert_eq!(timer.snapshot().elapsed_seconds, 2);
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(scheduler.active_count(), 1);
}

/// WHAT: Stopping an inactive timer still notifies
/// WHY: Stop is idempotent in effect, not silent
#[test]
#[allow(clippy::unwrap_used)]
fn given_inactive_timer_when_stopping_then_notifies_reset_state() {
    // Given: An inactive subscribed timer
    let (_scheduler, timer) = manual_timer();
    let seen = recording_subscriber(&timer);

    // When: Stopping twice
    timer.stop();
    timer.stop();

    // Then: Two notifications, both inactive
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|snapshot| !snapshot.is_active));
}

/// WHAT: Restarting after stop begins again from zero
/// WHY: Each session is independent
#[test]
fn given_stopped_timer_when_restarted_then_counts_from_zero() {
    // Given: A timer stopped after three ticks
    let (scheduler, timer) = manual_timer();
    timer.start();
    scheduler.advance(TICK * 3);
    timer.stop();

    // When: Restarting and ticking once
    timer.start();
    scheduler.advance(TICK);

    // Then: One second, one sample
    let snapshot = timer.snapshot();
    assert_eq!(snapshot.elapsed_seconds, 1);
    assert_eq!(snapshot.samples.len(), 1);
}

/// WHAT: Snapshots hold a private copy of the samples
/// WHY: Callers cannot mutate timer state through a snapshot
#[test]
fn given_snapshot_when_mutating_its_samples_then_timer_unaffected() {
    // Given: A timer with two samples
    let (scheduler, timer) = manual_timer();
    timer.start();
    scheduler.advance(TICK * 2);

    // When: Mutating a snapshot
    let mut snapshot = timer.snapshot();
    snapshot.samples.clear();
    snapshot.samples.push(1_000);

    // Then: Timer still has its own two samples
    assert_eq!(timer.snapshot().samples.len(), 2);
}

/// WHAT: Injected sample sources feed the sample buffer
/// WHY: Sampling is an outbound dependency, swappable in tests
#[test]
fn given_fixed_sample_source_when_ticking_then_samples_formatted() {
    // Given: A timer sampling 7, 8, 9, ...
    let scheduler = Arc::new(ManualScheduler::new());
    let mut next: u32 = 6;
    let timer = SessionTimer::with_sample_source(
        RecordingToken::named("A"),
        scheduler.clone(),
        TimerSettings::default(),
        move || {
            next += 1;
            next
        },
    );
    timer.start();

    // When: Three ticks
    scheduler.advance(TICK * 3);

    // Then: Samples in order, formatted with ellipses
    let snapshot = timer.snapshot();
    assert_eq!(snapshot.samples, vec![7, 8, 9]);
    assert_eq!(snapshot.formatted_samples, "7... 8... 9...");
}

/// WHAT: Tick interval comes from the settings
/// WHY: The interval is configurable per application
#[test]
#[allow(clippy::unwrap_used)]
fn given_custom_interval_when_advancing_then_ticks_at_that_interval() {
    // Given: A 250ms interval
    let scheduler = Arc::new(ManualScheduler::new());
    let settings = TimerSettings::new(Duration::from_millis(250), 10).unwrap();
    let timer = SessionTimer::new(RecordingToken::named("A"), scheduler.clone(), settings);
    timer.start();

    // When: One second passes
    scheduler.advance(Duration::from_secs(1));

    // Then: Four ticks, one second on the clock, samples below 10
    let snapshot = timer.snapshot();
    assert_eq!(snapshot.samples.len(), 4);
    assert_eq!(snapshot.elapsed_seconds, 1);
    assert_eq!(snapshot.formatted_duration, "00:01");
    assert!(snapshot.samples.iter().all(|sample| *sample < 10));
}

/// WHAT: Displayed duration follows wall-clock time, not the tick count
/// WHY: A faster tick rate must not make MM:SS run fast
#[test]
#[allow(clippy::unwrap_used)]
fn given_half_second_interval_when_three_ticks_then_duration_truncates_to_one_second() {
    // Given: A 500ms interval
    let scheduler = Arc::new(ManualScheduler::new());
    let settings = TimerSettings::new(Duration::from_millis(500), 100).unwrap();
    let timer = SessionTimer::new(RecordingToken::named("A"), scheduler.clone(), settings);
    timer.start();

    // When: Three ticks (1.5s)
    scheduler.advance(Duration::from_millis(1_500));

    // Then: Three samples, 00:01 shown
    let snapshot = timer.snapshot();
    assert_eq!(snapshot.samples.len(), 3);
    assert_eq!(snapshot.elapsed_seconds, 1);
    assert_eq!(snapshot.formatted_duration, "00:01");

    // When: One more tick (2s)
    scheduler.advance(Duration::from_millis(500));

    // Then: 00:02
    assert_eq!(timer.snapshot().formatted_duration, "00:02");
}

/// WHAT: A tick landing after stop draws no sample
/// WHY: Dropped ticks must not consume the sample source
#[test]
#[allow(clippy::unwrap_used)]
fn given_stopped_session_when_stray_tick_fires_then_no_sample_drawn() {
    // Given: A counting sample source and a scheduler that ignores cancel
    let draws = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&draws);
    let scheduler = Arc::new(StickyScheduler::default());
    let timer = SessionTimer::with_sample_source(
        RecordingToken::named("A"),
        scheduler.clone(),
        TimerSettings::default(),
        move || {
            counted.fetch_add(1, Ordering::SeqCst);
            5
        },
    );
    timer.start();
    scheduler.fire();
    timer.stop();

    // When: The uncancelled tick fires again
    scheduler.fire();

    // Then: Only the tick of the active session drew a sample
    assert_eq!(draws.load(Ordering::SeqCst), 1);
    assert_eq!(timer.snapshot().elapsed_seconds, 0);
    assert!(timer.snapshot().samples.is_empty());
}

/// WHAT: Zero interval or zero bound is rejected
/// WHY: A zero interval cannot drive a timer
#[test]
fn given_zero_settings_when_validating_then_invalid_timer_settings() {
    assert!(matches!(
        TimerSettings::new(Duration::ZERO, 100),
        Err(CoreError::InvalidTimerSettings { .. })
    ));
    assert!(matches!(
        TimerSettings::new(TICK, 0),
        Err(CoreError::InvalidTimerSettings { .. })
    ));
}

/// WHAT: Teardown twice stops the timer and silences subscribers
/// WHY: A closing surface may tear down more than once
#[test]
#[allow(clippy::unwrap_used)]
fn given_active_timer_when_torn_down_twice_then_inactive_and_silent() {
    // Given: An active, subscribed timer
    let (scheduler, timer) = manual_timer();
    let seen = recording_subscriber(&timer);
    timer.start();
    scheduler.advance(TICK);

    // When: Tearing down twice
    timer.teardown();
    timer.teardown();
    scheduler.advance(TICK * 3);

    // Then: Inactive, reset, and no notifications after start + one tick
    assert!(!timer.is_active());
    assert_eq!(timer.snapshot().elapsed_seconds, 0);
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(scheduler.active_count(), 0);
}

/// WHAT: Dropping a running timer cancels its schedule
/// WHY: A surface dropped without teardown must not leak ticks
#[test]
fn given_active_timer_when_dropped_then_schedule_cancelled() {
    // Given: A running timer
    let (scheduler, timer) = manual_timer();
    timer.start();

    // When: Dropping it
    drop(timer);

    // Then: Schedule gone
    assert_eq!(scheduler.active_count(), 0);
    scheduler.advance(TICK * 2);
}

/// WHAT: Acquire-then-start and stop-then-release keep timer and gate aligned
/// WHY: The timer is only active while its token holds the gate
#[test]
fn given_gate_and_timer_when_following_call_order_then_timer_active_only_while_held() {
    // Given: Gate and a surface timer
    let gate = RecordingGate::new();
    let (scheduler, timer) = manual_timer();
    let token = timer.token().clone();

    // When: Acquire then start
    assert!(gate.try_acquire(&token).is_acquired());
    timer.start();
    scheduler.advance(TICK * 2);

    // Then: Both engaged
    assert!(timer.is_active());
    assert!(gate.is_held_by(&token));

    // When: Stop then release
    timer.stop();
    assert!(gate.release(&token).is_released());

    // Then: Both idle
    assert!(!timer.is_active());
    assert!(!gate.is_held());
}

/// WHAT: The timer ticks on a tokio runtime
/// WHY: The application drives sessions with the tokio scheduler
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_tokio_scheduler_when_three_seconds_pass_then_three_ticks() {
    // Given: A timer on the test runtime
    let scheduler = Arc::new(TokioScheduler::current().unwrap());
    let timer = SessionTimer::new(
        RecordingToken::named("A"),
        scheduler.clone(),
        TimerSettings::default(),
    );

    // When: Started and three and a half seconds pass
    timer.start();
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    // Then: Three ticks recorded
    assert_eq!(timer.snapshot().elapsed_seconds, 3);

    // And: Stop cancels the runtime task
    timer.stop();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(timer.snapshot().elapsed_seconds, 0);
    assert_eq!(scheduler.active_count(), 0);
}
