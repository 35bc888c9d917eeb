use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the resolver chain.
/// Every module returns `Result<T, LocatorError>`.
#[derive(Debug, Error)]
pub enum LocatorError {
    // ── Resolution ──────────────────────────────────────
    #[error("could not resolve artifact for coordinate {0}")]
    NotFound(String),

    #[error("Invalid artifact coordinate: {0}")]
    InvalidCoordinate(String),

    // ── Configuration ───────────────────────────────────
    #[error("couldn't read dependency mapping {path:?}: {source}")]
    MappingRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed dependency mapping {path:?} at line {line}: {reason}")]
    MalformedMapping {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("couldn't read settings {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no resolver registered under '{0}'")]
    MissingResolver(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidSetting { key: String, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },
}

/// Convenience alias used throughout the crate.
pub type LocatorResult<T> = Result<T, LocatorError>;

impl LocatorError {
    /// Errors raised while assembling the chain rather than per coordinate.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LocatorError::MappingRead { .. }
                | LocatorError::MalformedMapping { .. }
                | LocatorError::ConfigRead { .. }
                | LocatorError::MissingResolver(_)
                | LocatorError::InvalidSetting { .. }
                | LocatorError::Json(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LocatorError::NotFound(_))
    }
}

impl From<std::io::Error> for LocatorError {
    fn from(source: std::io::Error) -> Self {
        LocatorError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

// ── Serialization for CLI reports ───────────────────────
impl serde::Serialize for LocatorError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_coordinate() {
        let err = LocatorError::NotFound("org.foo:bar:1.0".into());
        assert_eq!(
            err.to_string(),
            "could not resolve artifact for coordinate org.foo:bar:1.0"
        );
        assert!(err.is_not_found());
        assert!(!err.is_configuration());
    }

    #[test]
    fn mapping_errors_are_configuration_errors() {
        let err = LocatorError::MalformedMapping {
            path: PathBuf::from("/tmp/deps.properties"),
            line: 3,
            reason: "empty key".into(),
        };
        assert!(err.is_configuration());
        assert!(err.to_string().contains("/tmp/deps.properties"));
        assert!(err.to_string().contains("line 3"));
        assert!(LocatorError::MissingResolver("maven-cached".into()).is_configuration());
    }
}
