/// Result of [`RecordingGate::try_acquire`](crate::RecordingGate::try_acquire).
///
/// Rejection is an ordinary outcome (another surface is recording), not an
/// error. Converts to `bool` for callers that only care about success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AcquireOutcome {
    /// The caller now holds the gate.
    Acquired,
    /// The gate was already held; nothing changed.
    AlreadyHeld {
        /// The holder is the caller's own token. Acquisition is not re-entrant.
        by_caller: bool,
    },
}

impl AcquireOutcome {
    /// `true` for [`AcquireOutcome::Acquired`].
    pub fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

impl From<AcquireOutcome> for bool {
    fn from(outcome: AcquireOutcome) -> Self {
        outcome.is_acquired()
    }
}

/// Result of [`RecordingGate::release`](crate::RecordingGate::release).
///
/// Ignored releases are silent towards subscribers; this value only exists
/// for callers that want to know why nothing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The caller held the gate and it is now idle.
    Released,
    /// Another token holds the gate; it is still held.
    NotOwner,
    /// Nobody held the gate.
    NotHeld,
}

impl ReleaseOutcome {
    /// `true` for [`ReleaseOutcome::Released`].
    pub fn is_released(self) -> bool {
        matches!(self, Self::Released)
    }
}

impl From<ReleaseOutcome> for bool {
    fn from(outcome: ReleaseOutcome) -> Self {
        outcome.is_released()
    }
}
