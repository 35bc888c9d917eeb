use std::collections::HashMap;
use std::sync::Arc;

use super::{DependencyResolver, MavenCachedResolver};
use crate::core::config::{LocatorConfig, MAVEN_CACHED_RESOLVER};
use crate::core::error::{LocatorError, LocatorResult};

/// Builds a resolver from configuration.
pub type ResolverFactory =
    Arc<dyn Fn(&LocatorConfig) -> LocatorResult<Arc<dyn DependencyResolver>> + Send + Sync>;

/// Named constructors for online resolvers.
///
/// The chain builder picks the online strategy by name, so offline setups
/// never have to construct it.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    factories: HashMap<String, ResolverFactory>,
}

impl ResolverRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `maven-cached` resolver.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MAVEN_CACHED_RESOLVER, |config| {
            let resolver: Arc<dyn DependencyResolver> =
                Arc::new(MavenCachedResolver::from_config(config)?);
            Ok(resolver)
        });
        registry
    }

    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&LocatorConfig) -> LocatorResult<Arc<dyn DependencyResolver>> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Construct the resolver registered under `name`.
    pub fn create(
        &self,
        name: &str,
        config: &LocatorConfig,
    ) -> LocatorResult<Arc<dyn DependencyResolver>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| LocatorError::MissingResolver(name.to_string()))?;
        factory(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_maven_cached() {
        let registry = ResolverRegistry::with_defaults();
        assert!(registry.contains(MAVEN_CACHED_RESOLVER));

        let resolver = registry
            .create(MAVEN_CACHED_RESOLVER, &LocatorConfig::default())
            .unwrap();
        assert_eq!(resolver.name(), "maven-cached");
    }

    #[test]
    fn unknown_name_is_a_configuration_error() {
        let err = ResolverRegistry::new()
            .create("maven-cached", &LocatorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, LocatorError::MissingResolver(ref n) if n == "maven-cached"));
        assert!(err.is_configuration());
    }
}
