//! Engine configuration.

use serde::{Deserialize, Serialize};

use kdbxcore_common::{Error, Result};

/// Name of the provider registered by [`crate::create_default_registry`].
pub const DEFAULT_PROVIDER: &str = "software";

/// Selects the crypto provider and the start-up KDF backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Registered provider name (e.g., "software").
    pub provider: String,
    /// Provider-specific configuration.
    pub provider_config: serde_json::Value,
    /// Register the bundled software Argon2 backend at construction.
    ///
    /// Leave off when an external backend will be registered instead.
    pub software_argon2: bool,
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Serialization(format!("Invalid engine configuration: {}", e)))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            provider_config: serde_json::Value::Null,
            software_argon2: true,
        }
    }
}
