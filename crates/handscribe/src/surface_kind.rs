use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The two places a recording can be started from.
///
/// Each kind has at most one open surface at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Pop-up recording modal.
    Modal,
    /// Docked workspace view.
    View,
}

impl SurfaceKind {
    /// Lowercase name used in commands, tokens and config.
    pub fn label(self) -> &'static str {
        match self {
            SurfaceKind::Modal => "modal",
            SurfaceKind::View => "view",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SurfaceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "modal" => Ok(SurfaceKind::Modal),
            "view" => Ok(SurfaceKind::View),
            _ => Err(()),
        }
    }
}
