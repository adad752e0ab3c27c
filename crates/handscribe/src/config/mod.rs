mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod timer_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, logging_config::LoggingConfig,
    timer_config::TimerConfig,
};

use crate::SurfaceKind;

use handscribe_core::{DEFAULT_SAMPLE_UPPER_BOUND, DEFAULT_TICK_INTERVAL};

pub(crate) const DEFAULT_LOG_FILTER: &str = "handscribe=debug,handscribe_core=debug";

pub(crate) fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL.as_millis() as u64
}

pub(crate) fn default_sample_upper_bound() -> u32 {
    DEFAULT_SAMPLE_UPPER_BOUND
}

pub(crate) fn default_open_on_load() -> Vec<SurfaceKind> {
    vec![SurfaceKind::Modal, SurfaceKind::View]
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
