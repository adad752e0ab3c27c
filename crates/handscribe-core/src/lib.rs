//! Handscribe Core Library
//!
//! Recording coordination for hands-free dictation surfaces: a single-writer
//! [`RecordingGate`] shared by every surface, a per-surface [`SessionTimer`],
//! and the [`Observable`] value both of them publish their state through.
//!
//! # Example
//!
//! ```
//! use handscribe_core::{
//!     ManualScheduler, RecordingGate, RecordingToken, SessionTimer, TimerSettings,
//! };
//!
//! use std::{sync::Arc, time::Duration};
//!
//! let gate = Arc::new(RecordingGate::new());
//! let scheduler = Arc::new(ManualScheduler::new());
//! let token = RecordingToken::generate("modal");
//! let timer = SessionTimer::new(token.clone(), scheduler.clone(), TimerSettings::default());
//!
//! if gate.try_acquire(&token).is_acquired() {
//!     timer.start();
//! }
//!
//! scheduler.advance(Duration::from_secs(2));
//! assert_eq!(timer.snapshot().formatted_duration, "00:02");
//!
//! timer.stop();
//! gate.release(&token);
//! assert!(!gate.is_held());
//! ```

mod error;
mod gate;
mod observable;
mod scheduler;
mod session;
mod sync;
mod token;

pub use {
    error::CoreError,
    error::Result as CoreResult,
    gate::{AcquireOutcome, GatePhase, GateSnapshot, RecordingGate, ReleaseOutcome},
    observable::{Observable, Subscription},
    scheduler::{ManualScheduler, ScheduleHandle, Scheduler, TickFn, TokioScheduler},
    session::{
        DEFAULT_SAMPLE_UPPER_BOUND, DEFAULT_TICK_INTERVAL, RandomSamples, SampleSource,
        SessionSnapshot, SessionTimer, TimerSettings, format_duration, format_samples,
    },
    token::RecordingToken,
};
