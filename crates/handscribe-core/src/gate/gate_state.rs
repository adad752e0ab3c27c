use crate::RecordingToken;

/// Whether any surface currently holds the recording gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    /// Nobody is recording.
    #[default]
    Idle,
    /// Exactly one surface holds the gate.
    Recording,
}

/// Internal gate state. `phase` is kept in step with `holder` by the only
/// two mutating paths, `hold` and `clear`.
#[derive(Debug, Clone, Default)]
pub(crate) struct GateState {
    holder: Option<RecordingToken>,
    phase: GatePhase,
}

impl GateState {
    pub(crate) fn holder(&self) -> Option<&RecordingToken> {
        self.holder.as_ref()
    }

    pub(crate) fn hold(&mut self, token: RecordingToken) {
        self.holder = Some(token);
        self.phase = GatePhase::Recording;
    }

    pub(crate) fn clear(&mut self) {
        self.holder = None;
        self.phase = GatePhase::Idle;
    }
}

/// Snapshot of the gate handed to subscribers and returned by
/// [`RecordingGate::snapshot`](crate::RecordingGate::snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSnapshot {
    /// Token currently granted recording rights.
    pub holder: Option<RecordingToken>,
    /// `true` iff `holder` is set.
    pub is_held: bool,
    /// Phase derived from `holder`.
    pub phase: GatePhase,
}

impl GateSnapshot {
    /// Whether the gate is held by `token`.
    pub fn is_held_by(&self, token: &RecordingToken) -> bool {
        self.holder.as_ref() == Some(token)
    }
}

impl From<&GateState> for GateSnapshot {
    fn from(state: &GateState) -> Self {
        Self {
            holder: state.holder.clone(),
            is_held: state.holder.is_some(),
            phase: state.phase,
        }
    }
}
