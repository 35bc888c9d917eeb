use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{
    ConventionPathResolver, DependencyResolver, PropertiesMapResolver, ResolverRegistry,
};
use crate::core::config::{LocatorConfig, OVERRIDE_RESOURCE_NAME};
use crate::core::error::LocatorResult;
use crate::core::maven::ArtifactCoordinate;
use crate::core::paths::find_resource;

/// Assembles the resolver chain from configuration.
///
/// Base resolver, first match wins:
/// 1. offline with `deps_properties` set: that mapping, no fallback
/// 2. offline otherwise: convention paths under `dependency_dir`
/// 3. online: the resolver registered as `online_resolver`
///
/// If `artifact-deps.properties` is found on the resource path, it is put in
/// front of the base resolver as an override layer.
pub struct ChainBuilder {
    config: LocatorConfig,
    registry: ResolverRegistry,
}

impl ChainBuilder {
    pub fn new(config: LocatorConfig) -> Self {
        Self {
            config,
            registry: ResolverRegistry::with_defaults(),
        }
    }

    pub fn with_registry(mut self, registry: ResolverRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> LocatorResult<ChainedResolver> {
        let base = self.base_resolver()?;
        let inner = match find_resource(&self.config.resource_path, OVERRIDE_RESOURCE_NAME) {
            Some(overrides) => Self::override_layer(&overrides, base)?,
            None => base,
        };

        debug!("Resolver chain: {}", inner.layers().join(" -> "));
        Ok(ChainedResolver { inner })
    }

    fn base_resolver(&self) -> LocatorResult<Arc<dyn DependencyResolver>> {
        let config = &self.config;

        if config.offline {
            if let Some(deps_properties) = &config.deps_properties {
                debug!("Offline: resolving from {:?}", deps_properties);
                return Ok(Arc::new(PropertiesMapResolver::load(deps_properties, None)?));
            }

            debug!("Offline: resolving under {:?}", config.dependency_dir);
            return Ok(Arc::new(ConventionPathResolver::with_layout(
                config.dependency_dir.clone(),
                config.dependency_layout,
            )));
        }

        debug!("Online: using '{}' resolver", config.online_resolver);
        self.registry.create(&config.online_resolver, config)
    }

    fn override_layer(
        overrides: &Path,
        base: Arc<dyn DependencyResolver>,
    ) -> LocatorResult<Arc<dyn DependencyResolver>> {
        info!("Using artifact overrides from {}", overrides.display());
        Ok(Arc::new(PropertiesMapResolver::load(overrides, Some(base))?))
    }
}

/// Single entry point for artifact resolution, built once and reused.
#[derive(Clone)]
pub struct ChainedResolver {
    inner: Arc<dyn DependencyResolver>,
}

impl ChainedResolver {
    /// Build the chain with the default resolver registry.
    pub fn from_config(config: LocatorConfig) -> LocatorResult<Self> {
        ChainBuilder::new(config).build()
    }

    pub fn builder(config: LocatorConfig) -> ChainBuilder {
        ChainBuilder::new(config)
    }
}

#[async_trait]
impl DependencyResolver for ChainedResolver {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn layers(&self) -> Vec<String> {
        self.inner.layers()
    }

    async fn resolve_one(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<PathBuf> {
        self.inner.resolve_one(coordinate).await
    }

    async fn resolve_all(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<Vec<PathBuf>> {
        self.inner.resolve_all(coordinate).await
    }
}
