use error_location::ErrorLocation;
use thiserror::Error;

/// Coordination core errors with source location tracking.
///
/// Gate and timer misuse (double acquire, foreign release, repeated
/// teardown) is never an error; these variants only cover wiring problems.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A tokio-backed scheduler was requested outside of a tokio runtime.
    #[error("No tokio runtime available: {reason} {location}")]
    NoRuntime {
        /// Description of the runtime lookup failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Timer settings cannot drive a session.
    #[error("Invalid timer settings: {reason} {location}")]
    InvalidTimerSettings {
        /// Description of the rejected setting.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
