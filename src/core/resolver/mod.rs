// ─── Dependency Resolvers ───
// Strategies that map an artifact coordinate to local files, and the chain
// that layers them.
//
//   properties  — static mapping resource, optional fallback delegate
//   convention  — path computed under a base directory
//   cached      — download from Maven repositories into a local cache
//   registry    — name-based lookup of the online resolver
//   chain       — configuration -> ordered resolver chain

mod cached;
mod chain;
mod convention;
mod properties;
mod registry;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::error::LocatorResult;
use crate::core::maven::ArtifactCoordinate;

pub use cached::MavenCachedResolver;
pub use chain::{ChainBuilder, ChainedResolver};
pub use convention::ConventionPathResolver;
pub use properties::PropertiesMapResolver;
pub use registry::{ResolverFactory, ResolverRegistry};

/// A strategy for locating local artifact files.
///
/// Implementations are immutable once built and safe to call concurrently.
#[async_trait]
pub trait DependencyResolver: Send + Sync {
    /// Short label used in logs and chain descriptions.
    fn name(&self) -> &str;

    /// Layers consulted by this resolver, outermost first.
    fn layers(&self) -> Vec<String> {
        vec![self.name().to_string()]
    }

    /// Location of the primary artifact for `coordinate`.
    async fn resolve_one(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<PathBuf>;

    /// Every known location for `coordinate`, primary artifact first.
    async fn resolve_all(&self, coordinate: &ArtifactCoordinate) -> LocatorResult<Vec<PathBuf>>;
}
