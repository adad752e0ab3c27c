use crate::{
    AppResult,
    config::{default_sample_upper_bound, default_tick_interval_ms},
};

use std::time::Duration;

use handscribe_core::TimerSettings;
use serde::{Deserialize, Serialize};

/// Session timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Milliseconds between session ticks. Each tick advances the session
    /// clock by this amount, so the displayed duration stays wall-clock time.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Exclusive upper bound of mock samples.
    #[serde(default = "default_sample_upper_bound")]
    pub sample_upper_bound: u32,
}

impl TimerConfig {
    /// Validated core timer settings.
    #[track_caller]
    pub fn settings(&self) -> AppResult<TimerSettings> {
        Ok(TimerSettings::new(
            Duration::from_millis(self.tick_interval_ms),
            self.sample_upper_bound,
        )?)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            sample_upper_bound: default_sample_upper_bound(),
        }
    }
}
