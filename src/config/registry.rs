//! Registry behavior configuration.

use super::defaults::default_max_players;
use serde::{Deserialize, Serialize};

/// Settings applied to servers and players tracked by the registry.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    /// Capacity given to a newly registered server unless its registration
    /// request names one
    #[serde(default = "default_max_players")]
    pub default_max_players: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_max_players: default_max_players(),
        }
    }
}
