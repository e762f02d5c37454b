//! Dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Behaviour switches for a hook dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Whether hook names containing `*` are compiled into wildcard patterns.
    /// When disabled they only match themselves.
    #[serde(default = "default_true")]
    pub wildcards: bool,
    /// Whether `mock` is honoured. Production hosts may turn this off.
    #[serde(default = "default_true")]
    pub allow_mocks: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            wildcards: true,
            allow_mocks: true,
        }
    }
}

fn default_true() -> bool {
    true
}
