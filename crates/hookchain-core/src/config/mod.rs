//! Configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus `HOOKCHAIN__`-prefixed environment variables.
//! Every field carries a serde default, so an empty source is valid.

pub mod dispatcher;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::dispatcher::DispatcherConfig;
use self::logging::LoggingConfig;

use crate::error::HookError;

/// Root configuration for a host embedding hookchain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookchainConfig {
    /// Dispatcher behaviour switches.
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HookchainConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// `config/{env}` and environment variables such as
    /// `HOOKCHAIN__DISPATCHER__WILDCARDS=false`.
    pub fn load(env: &str) -> Result<Self, HookError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKCHAIN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HookError::configuration(format!("Failed to build config: {e}")))?;

        tracing::debug!(env = %env, "Hookchain configuration sources merged");

        config
            .try_deserialize()
            .map_err(|e| HookError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, HookError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
