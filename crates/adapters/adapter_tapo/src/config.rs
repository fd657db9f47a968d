//! Tapo gateway configuration.

use serde::Deserialize;

/// Configuration for the Tapo gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TapoConfig {
    /// Address the discovery probe is sent to. The limited broadcast address
    /// reaches every device on the local segment.
    pub discovery_target: String,
}

impl Default for TapoConfig {
    fn default() -> Self {
        Self {
            discovery_target: "255.255.255.255".to_string(),
        }
    }
}
