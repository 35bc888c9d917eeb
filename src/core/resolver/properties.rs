use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::DependencyResolver;
use crate::core::error::{LocatorError, LocatorResult};
use crate::core::mapping::ResolutionMapping;
use crate::core::maven::ArtifactCoordinate;

/// Resolves coordinates through a mapping resource, handing misses to an
/// optional fallback delegate.
pub struct PropertiesMapResolver {
    mapping: ResolutionMapping,
    fallback: Option<Arc<dyn DependencyResolver>>,
}

impl PropertiesMapResolver {
    /// Read the mapping eagerly; an unreadable or malformed resource fails here.
    pub fn load(
        path: &Path,
        fallback: Option<Arc<dyn DependencyResolver>>,
    ) -> LocatorResult<Self> {
        Ok(Self::new(ResolutionMapping::load(path)?, fallback))
    }

    pub fn new(mapping: ResolutionMapping, fallback: Option<Arc<dyn DependencyResolver>>) -> Self {
        Self { mapping, fallback }
    }

    pub fn source(&self) -> &Path {
        self.mapping.source()
    }

    fn lookup(&self, coordinate: &ArtifactCoordinate) -> Option<&[PathBuf]> {
        let found = self.mapping.get(&coordinate.key());
        debug!(
            "{} lookup for {} in {:?}",
            if found.is_some() { "hit" } else { "miss" },
            coordinate,
            self.mapping.source()
        );
        found
    }

    fn fallback(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<&dyn DependencyResolver> {
        self.fallback
            .as_deref()
            .ok_or_else(|| LocatorError::NotFound(coordinate.to_string()))
    }
}

#[async_trait]
impl DependencyResolver for PropertiesMapResolver {
    fn name(&self) -> &str {
        "properties"
    }

    fn layers(&self) -> Vec<String> {
        let mut layers = vec![format!("properties({})", self.mapping.source().display())];
        if let Some(fallback) = &self.fallback {
            layers.extend(fallback.layers());
        }
        layers
    }

    async fn resolve_one(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<PathBuf> {
        if let Some(paths) = self.lookup(coordinate) {
            if let Some(first) = paths.first() {
                return Ok(first.clone());
            }
        }
        self.fallback(coordinate)?.resolve_one(coordinate).await
    }

    async fn resolve_all(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<Vec<PathBuf>> {
        if let Some(paths) = self.lookup(coordinate) {
            return Ok(paths.to_vec());
        }
        self.fallback(coordinate)?.resolve_all(coordinate).await
    }
}
