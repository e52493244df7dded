//! Provider registry for resolving crypto providers from configuration.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::{CryptoProvider, SoftwareProvider};
use kdbxcore_common::{Error, Result};

/// Factory function type for creating providers.
pub type ProviderFactory = Box<dyn Fn(&Value) -> Result<Arc<dyn CryptoProvider>> + Send + Sync>;

/// Registry for crypto provider factories.
///
/// Maps a provider name, as written in [`crate::EngineConfig`], to the
/// factory that builds it.
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a provider factory.
    ///
    /// # Preconditions
    /// - `name` is not already registered
    ///
    /// # Postconditions
    /// - `resolve(name, ..)` calls `factory`
    /// - Existing registrations are unchanged on error
    ///
    /// # Errors
    /// - Returns error if name is already registered
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) -> Result<()> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::AlreadyExists(format!(
                "Provider '{}' is already registered",
                name
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Resolve a provider by name and configuration.
    ///
    /// # Postconditions
    /// - Returns a new provider built by the registered factory
    ///
    /// # Errors
    /// - Provider not found
    /// - Configuration invalid for the provider
    pub fn resolve(&self, name: &str, config: &Value) -> Result<Arc<dyn CryptoProvider>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            Error::NotFound(format!("Provider '{}' is not registered", name))
        })?;
        factory(config)
    }

    /// Get list of registered provider names.
    pub fn providers(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Check if a provider is registered.
    pub fn has_provider(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the software provider from its configuration.
///
/// Accepts an optional `max_random_len` number; anything else is ignored.
fn software_factory(config: &Value) -> Result<Arc<dyn CryptoProvider>> {
    let mut provider = SoftwareProvider::new();
    match config.get("max_random_len") {
        None | Some(Value::Null) => {}
        Some(value) => {
            let max = value.as_u64().ok_or_else(|| {
                Error::InvalidInput("'max_random_len' must be a non-negative integer".to_string())
            })?;
            let max = usize::try_from(max).map_err(|_| {
                Error::InvalidInput(format!("'max_random_len' {} is out of range", max))
            })?;
            provider = provider.with_max_random_len(max);
        }
    }
    Ok(Arc::new(provider))
}

/// Create a registry with default providers.
pub fn create_default_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry
        .factories
        .insert("software".to_string(), Box::new(software_factory));
    registry
}
