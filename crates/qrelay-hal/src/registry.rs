//! Backend registry for looking up backends by name.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

/// Factory function type for registered backends.
type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

struct Entry {
    description: String,
    factory: Factory,
}

/// Central registry of backend factories keyed by name.
pub struct BackendRegistry {
    entries: FxHashMap<String, Entry>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register a backend type.
    pub fn register<B>(&mut self, name: impl Into<String>, description: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        self.register_factory(name, description, |config| {
            let backend = B::from_config(config)?;
            Ok(Box::new(backend))
        });
    }

    /// Register a backend factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering backend: {}", name);
        self.entries.insert(
            name,
            Entry {
                description: description.into(),
                factory: Box::new(factory),
            },
        );
    }

    /// Create a backend by name.
    ///
    /// `config.name` is set to `name`.
    pub fn create(&self, name: &str, mut config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| HalError::UnknownBackend(name.to_string()))?;
        config.name = name.to_string();
        (entry.factory)(config)
    }

    /// Check whether a backend is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// `(name, description)` for every backend, sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut list: Vec<_> = self
            .entries
            .iter()
            .map(|(name, e)| (name.as_str(), e.description.as_str()))
            .collect();
        list.sort_unstable();
        list
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
