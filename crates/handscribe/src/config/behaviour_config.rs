use crate::{SurfaceKind, config::default_open_on_load};

use serde::{Deserialize, Serialize};

/// Plugin behaviour configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Surfaces opened when the plugin loads.
    #[serde(default = "default_open_on_load")]
    pub open_on_load: Vec<SurfaceKind>,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            open_on_load: default_open_on_load(),
        }
    }
}
