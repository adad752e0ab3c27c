use crate::{CoreError, CoreResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

/// Interval between session ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Exclusive upper bound of mock samples.
pub const DEFAULT_SAMPLE_UPPER_BOUND: u32 = 100;

/// How a [`SessionTimer`](crate::SessionTimer) ticks and what it samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    tick_interval: Duration,
    sample_upper_bound: u32,
}

impl TimerSettings {
    /// Validated settings.
    ///
    /// # Errors
    ///
    /// Returns error if the tick interval or the sample bound is zero.
    #[track_caller]
    pub fn new(tick_interval: Duration, sample_upper_bound: u32) -> CoreResult<Self> {
        if tick_interval.is_zero() {
            return Err(CoreError::InvalidTimerSettings {
                reason: "tick interval must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if sample_upper_bound == 0 {
            return Err(CoreError::InvalidTimerSettings {
                reason: "sample upper bound must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            tick_interval,
            sample_upper_bound,
        })
    }

    /// Time between ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Exclusive upper bound of generated samples.
    pub fn sample_upper_bound(&self) -> u32 {
        self.sample_upper_bound
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            sample_upper_bound: DEFAULT_SAMPLE_UPPER_BOUND,
        }
    }
}
