#[allow(clippy::module_inception)]
mod gate;
mod gate_state;
mod outcome;

pub(crate) use gate_state::GateState;

pub use {
    gate::RecordingGate,
    gate_state::{GatePhase, GateSnapshot},
    outcome::{AcquireOutcome, ReleaseOutcome},
};
