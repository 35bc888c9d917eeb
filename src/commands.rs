use serde::Serialize;
use tracing::warn;

use crate::core::error::LocatorError;
use crate::core::maven::ArtifactCoordinate;
use crate::core::resolver::{ChainedResolver, DependencyResolver};

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolveOutcome {
    Resolved { paths: Vec<String> },
    Failed { error: LocatorError },
}

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub coordinate: String,
    #[serde(flatten)]
    pub outcome: ResolveOutcome,
}

impl ResolveReport {
    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, ResolveOutcome::Resolved { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct ChainInfo {
    pub layers: Vec<String>,
}

/// Resolve each coordinate string, reporting failures per coordinate.
///
/// With `all`, every known variant is returned; `extra_classifiers` are
/// requested alongside the primary artifact.
pub async fn resolve_coordinates(
    resolver: &ChainedResolver,
    coordinates: &[String],
    all: bool,
    extra_classifiers: &[String],
) -> Vec<ResolveReport> {
    let mut reports = Vec::with_capacity(coordinates.len());

    for raw in coordinates {
        let outcome = match resolve_single(resolver, raw, all, extra_classifiers).await {
            Ok(paths) => ResolveOutcome::Resolved {
                paths: paths
                    .iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect(),
            },
            Err(error) => {
                warn!("Failed to resolve {}: {}", raw, error);
                ResolveOutcome::Failed { error }
            }
        };

        reports.push(ResolveReport {
            coordinate: raw.trim().to_string(),
            outcome,
        });
    }

    reports
}

async fn resolve_single(
    resolver: &ChainedResolver,
    raw: &str,
    all: bool,
    extra_classifiers: &[String],
) -> Result<Vec<std::path::PathBuf>, LocatorError> {
    let coordinate = extra_classifiers
        .iter()
        .fold(ArtifactCoordinate::parse(raw)?, |c, classifier| {
            c.with_extra_classifier(classifier)
        });

    if all || !coordinate.extra_classifiers.is_empty() {
        resolver.resolve_all(&coordinate).await
    } else {
        Ok(vec![resolver.resolve_one(&coordinate).await?])
    }
}

pub fn describe_chain(resolver: &ChainedResolver) -> ChainInfo {
    ChainInfo {
        layers: resolver.layers(),
    }
}
