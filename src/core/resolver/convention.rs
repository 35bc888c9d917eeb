use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::DependencyResolver;
use crate::core::config::DependencyLayout;
use crate::core::error::LocatorResult;
use crate::core::maven::ArtifactCoordinate;

/// Computes artifact locations under a base directory.
///
/// The computed path is not checked for existence.
pub struct ConventionPathResolver {
    base_dir: PathBuf,
    layout: DependencyLayout,
}

impl ConventionPathResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_layout(base_dir, DependencyLayout::Flat)
    }

    pub fn with_layout(base_dir: impl Into<PathBuf>, layout: DependencyLayout) -> Self {
        Self {
            base_dir: base_dir.into(),
            layout,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, coordinate: &ArtifactCoordinate) -> PathBuf {
        match self.layout {
            DependencyLayout::Flat => self.base_dir.join(coordinate.file_name()),
            DependencyLayout::Maven => self.base_dir.join(coordinate.local_path()),
        }
    }
}

#[async_trait]
impl DependencyResolver for ConventionPathResolver {
    fn name(&self) -> &str {
        "convention"
    }

    fn layers(&self) -> Vec<String> {
        vec![format!("convention({})", self.base_dir.display())]
    }

    async fn resolve_one(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<PathBuf> {
        Ok(self.path_for(coordinate))
    }

    async fn resolve_all(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<Vec<PathBuf>> {
        Ok(coordinate
            .variants()
            .iter()
            .map(|variant| self.path_for(variant))
            .collect())
    }
}
