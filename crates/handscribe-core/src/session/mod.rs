mod format;
mod sample_source;
mod session_state;
mod settings;
mod timer;

pub(crate) use session_state::SessionState;

pub use {
    format::{format_duration, format_samples},
    sample_source::{RandomSamples, SampleSource},
    session_state::SessionSnapshot,
    settings::{DEFAULT_SAMPLE_UPPER_BOUND, DEFAULT_TICK_INTERVAL, TimerSettings},
    timer::SessionTimer,
};
