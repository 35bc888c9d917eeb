pub mod commands;
pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::config::LocatorConfig;
pub use crate::core::error::{LocatorError, LocatorResult};
pub use crate::core::maven::ArtifactCoordinate;
pub use crate::core::resolver::{ChainBuilder, ChainedResolver, DependencyResolver};

/// Install the structured logging subscriber. Later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,artifact_locator=debug")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
