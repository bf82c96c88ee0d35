//! Runtime configuration for the vertical NDI output.
//!
//! The struct is serde-derived so the embedding application can persist it
//! alongside its own settings; this crate never touches disk itself.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Mutable configuration the controller reads on `init` and listeners write
/// back into when the output actually starts or stops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Whether the vertical output should be running
    #[serde(default)]
    pub vertical_output_enabled: bool,

    /// NDI source name advertised on the network. Empty disables the output.
    #[serde(default)]
    pub vertical_output_name: String,

    /// Comma-separated NDI groups, empty for the default group
    #[serde(default)]
    pub vertical_output_groups: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vertical_output_enabled: false,
            vertical_output_name: String::new(),
            vertical_output_groups: String::new(),
        }
    }
}

impl Config {
    /// Wrap the config for shared access between the controller, the event
    /// listener and the UI.
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

/// Config shared across threads. Lock scope is kept to single field
/// reads/writes; nothing holds the lock across a lifecycle operation.
pub type SharedConfig = Arc<RwLock<Config>>;
