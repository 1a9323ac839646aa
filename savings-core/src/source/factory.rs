use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::repository::{SourceError, TaxYearRepository, TaxYearTable};

/// Backend-agnostic constants-source configuration.
///
/// `backend` must match the [`TaxYearSourceFactory::backend_name`] of a
/// registered factory. `location` is passed through to that factory
/// unchanged; its meaning is entirely backend-specific.
///
/// | backend    | location                         |
/// |------------|----------------------------------|
/// | `builtin`  | ignored                          |
/// | `csv`      | path to a tax-year table file    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"builtin"`).
    pub backend: String,
    pub location: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: "builtin".to_string(),
            location: None,
        }
    }
}

/// One implementation per constants backend, registered with a
/// [`SourceRegistry`] at startup.
pub trait TaxYearSourceFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Load the constants described by `config` and return a ready-to-use
    /// repository.
    fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn TaxYearRepository>, SourceError>;
}

/// Serves the compiled-in [`TaxYearTable::builtin`] table.
pub struct BuiltinSourceFactory;

impl TaxYearSourceFactory for BuiltinSourceFactory {
    fn backend_name(&self) -> &'static str {
        "builtin"
    }

    fn create(
        &self,
        _config: &SourceConfig,
    ) -> Result<Box<dyn TaxYearRepository>, SourceError> {
        Ok(Box::new(TaxYearTable::builtin()))
    }
}

/// Registry of [`TaxYearSourceFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `SourceRegistry::new()` (already knows `builtin`).
/// 2. Call `register` once per additional backend.
/// 3. Call `create` with the configured [`SourceConfig`].
pub struct SourceRegistry {
    factories: HashMap<&'static str, Box<dyn TaxYearSourceFactory>>,
}

impl SourceRegistry {
    /// Create a registry with the built-in backend registered.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(Box::new(BuiltinSourceFactory));
        registry
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn TaxYearSourceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`SourceError::Configuration`] when no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn TaxYearRepository>, SourceError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SourceError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        tracing::debug!(backend = factory.backend_name(), "creating tax-year source");
        factory.create(config)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
