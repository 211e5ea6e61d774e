//! Registry for modules

use crate::{BoxedModule, ModuleError};
use std::collections::HashMap;

/// Function that creates a fresh, unshared module
pub type ModuleFactory = fn() -> BoxedModule;

/// Registry of module factories, keyed by the name used in configuration
///
/// Built once at startup and shared read-only afterwards; there is no
/// runtime registration.
#[derive(Default)]
pub struct Registry {
    modules: HashMap<String, ModuleFactory>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Register a module, replacing any factory already bound to `name`
    pub fn register(&mut self, name: &str, factory: ModuleFactory) {
        if self.modules.insert(name.to_string(), factory).is_some() {
            log::warn!("Module {} registered twice, keeping the last factory", name);
        }
    }

    /// Look up the factory registered under `name`
    pub fn lookup(&self, name: &str) -> Option<ModuleFactory> {
        self.modules.get(name).copied()
    }

    /// Create a module by name
    pub fn create(&self, name: &str) -> Result<BoxedModule, ModuleError> {
        let factory = self
            .lookup(name)
            .ok_or_else(|| ModuleError::NotFound(name.to_string()))?;
        Ok(factory())
    }

    /// List all registered module names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorText;

    fn error_text() -> BoxedModule {
        Box::new(ErrorText)
    }

    #[test]
    fn test_lookup_registered() {
        let mut registry = Registry::new();
        registry.register("ErrorText", error_text);

        assert!(registry.lookup("ErrorText").is_some());
        assert!(registry.create("ErrorText").is_ok());
        assert_eq!(registry.names(), vec!["ErrorText".to_string()]);
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut registry = Registry::new();
        registry.register("ErrorText", error_text);

        assert!(registry.lookup("errortext").is_none());
        match registry.create("Volume") {
            Err(ModuleError::NotFound(name)) => assert_eq!(name, "Volume"),
            _ => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
