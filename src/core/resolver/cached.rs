use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use super::DependencyResolver;
use crate::core::config::LocatorConfig;
use crate::core::downloader::{is_missing, Downloader};
use crate::core::error::{LocatorError, LocatorResult};
use crate::core::maven::ArtifactCoordinate;

/// Downloads artifacts from Maven repositories into a local cache, reusing
/// cached files without touching the network.
pub struct MavenCachedResolver {
    /// Ordered list of repository base URLs to search.
    repositories: Vec<String>,
    cache_dir: PathBuf,
    downloader: Downloader,
}

impl MavenCachedResolver {
    pub fn new(repositories: Vec<String>, cache_dir: PathBuf, downloader: Downloader) -> Self {
        Self {
            repositories,
            cache_dir,
            downloader,
        }
    }

    pub fn from_config(config: &LocatorConfig) -> LocatorResult<Self> {
        Ok(Self::new(
            config.repositories.clone(),
            config.cache_dir.clone(),
            Downloader::new()?,
        ))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    async fn fetch(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<PathBuf> {
        let dest = self.cache_dir.join(coordinate.local_path());
        if tokio::fs::try_exists(&dest).await.unwrap_or(false) {
            debug!("Cache hit for {}: {:?}", coordinate, dest);
            return Ok(dest);
        }

        self.try_download(coordinate, &dest).await?;
        info!("Cached {} at {:?}", coordinate, dest);
        Ok(dest)
    }

    /// Try each repository until a download succeeds.
    ///
    /// Only 404s from every repository count as "not found"; any other
    /// failure is reported as-is.
    async fn try_download(&self, coordinate: &ArtifactCoordinate, dest: &Path) -> LocatorResult<()> {
        let mut last_err: Option<LocatorError> = None;

        for repo in &self.repositories {
            let url = coordinate.url(repo);
            match self.downloader.download_file(&url, dest).await {
                Ok(()) => return Ok(()),
                Err(e) if is_missing(&e) => {
                    debug!("Repository {} has no {}", repo, coordinate);
                }
                Err(e) => {
                    warn!("Repository {} failed for {}: {}", repo, coordinate, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| LocatorError::NotFound(coordinate.to_string())))
    }
}

#[async_trait]
impl DependencyResolver for MavenCachedResolver {
    fn name(&self) -> &str {
        "maven-cached"
    }

    fn layers(&self) -> Vec<String> {
        vec![format!("maven-cached({})", self.cache_dir.display())]
    }

    async fn resolve_one(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<PathBuf> {
        self.fetch(coordinate).await
    }

    async fn resolve_all(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<Vec<PathBuf>> {
        let variants = coordinate.variants();
        stream::iter(
            variants
                .into_iter()
                .map(|variant| async move { self.fetch(&variant).await }),
        )
        .buffered(self.downloader.concurrency())
        .try_collect()
        .await
    }
}
