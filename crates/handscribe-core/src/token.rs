use std::{fmt, sync::Arc};

use uuid::Uuid;

/// Opaque identity of one recording surface.
///
/// Only equality matters to the gate. Tokens are cheap to clone and are
/// compared by value, so the surface that acquired the gate can release it
/// with any clone of its own token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingToken(Arc<str>);

impl RecordingToken {
    /// Generate a fresh token prefixed with a human-readable label.
    ///
    /// The UUID suffix keeps tokens unique even when the same kind of
    /// surface is opened, closed and opened again.
    pub fn generate(label: &str) -> Self {
        Self(Arc::from(format!("{label}-{}", Uuid::new_v4())))
    }

    /// Token with an exact, caller-chosen value.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    /// String form of the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordingToken {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}
