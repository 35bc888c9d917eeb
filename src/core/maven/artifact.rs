use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::core::error::{LocatorError, LocatorResult};

pub const DEFAULT_TYPE: &str = "jar";

/// Identifies a dependency artifact to resolve.
///
/// Supported formats:
///   `group:name:version`
///   `group:name:version:classifier`
///   `group:name:version:classifier@type`
///   `group:name:version@type`
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
    pub classifier: Option<String>,
    /// File extension. Defaults to `"jar"`.
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// Additional classifier variants requested from `resolve_all`
    /// (e.g. `sources`). Not part of the lookup key.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_classifiers: Vec<String>,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

impl ArtifactCoordinate {
    pub fn new(group: &str, name: &str, version: &str) -> LocatorResult<Self> {
        if group.is_empty() || name.is_empty() || version.is_empty() {
            return Err(LocatorError::InvalidCoordinate(format!(
                "{}:{}:{}",
                group, name, version
            )));
        }

        Ok(Self {
            group: group.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            classifier: None,
            artifact_type: default_type(),
            extra_classifiers: Vec::new(),
        })
    }

    /// Parse a coordinate string.
    ///
    /// # Examples
    /// ```
    /// use artifact_locator::core::maven::ArtifactCoordinate;
    ///
    /// let c = ArtifactCoordinate::parse("org.foo:bar:1.0").unwrap();
    /// assert_eq!(c.group, "org.foo");
    /// ```
    pub fn parse(coord: &str) -> LocatorResult<Self> {
        let coord = coord.trim();

        // Split off @type first
        let (coord_part, type_override) = match coord.rfind('@') {
            Some(idx) => (&coord[..idx], Some(&coord[idx + 1..])),
            None => (coord, None),
        };

        let parts: Vec<&str> = coord_part.split(':').collect();
        let mut parsed = match parts.as_slice() {
            [group, name, version] => Self::new(group, name, version),
            [group, name, version, classifier] if !classifier.is_empty() => {
                Self::new(group, name, version).map(|c| c.with_classifier(classifier))
            }
            _ => Err(LocatorError::InvalidCoordinate(coord.to_string())),
        }
        .map_err(|_| LocatorError::InvalidCoordinate(coord.to_string()))?;

        if let Some(t) = type_override {
            if t.is_empty() {
                return Err(LocatorError::InvalidCoordinate(coord.to_string()));
            }
            parsed.artifact_type = t.to_string();
        }

        Ok(parsed)
    }

    /// An empty classifier clears it.
    pub fn with_classifier(mut self, classifier: &str) -> Self {
        self.classifier = (!classifier.is_empty()).then(|| classifier.to_string());
        self
    }

    /// An empty type keeps the current one.
    pub fn with_type(mut self, artifact_type: &str) -> Self {
        if !artifact_type.is_empty() {
            self.artifact_type = artifact_type.to_string();
        }
        self
    }

    /// Request an additional classifier variant from `resolve_all`.
    pub fn with_extra_classifier(mut self, classifier: &str) -> Self {
        if !classifier.is_empty() && !self.extra_classifiers.iter().any(|c| c == classifier) {
            self.extra_classifiers.push(classifier.to_string());
        }
        self
    }

    /// Key used in dependency mapping resources.
    ///
    /// `group:name:version[:classifier][@type]`, the type only when it is not `jar`.
    pub fn key(&self) -> String {
        let mut key = format!("{}:{}:{}", self.group, self.name, self.version);
        if let Some(c) = &self.classifier {
            key.push(':');
            key.push_str(c);
        }
        if self.artifact_type != DEFAULT_TYPE {
            key.push('@');
            key.push_str(&self.artifact_type);
        }
        key
    }

    /// The primary artifact followed by one coordinate per extra classifier.
    pub fn variants(&self) -> Vec<ArtifactCoordinate> {
        let primary = ArtifactCoordinate {
            extra_classifiers: Vec::new(),
            ..self.clone()
        };

        let mut variants = vec![primary.clone()];
        for c in &self.extra_classifiers {
            if primary.classifier.as_deref() == Some(c.as_str()) {
                continue;
            }
            variants.push(primary.clone().with_classifier(c));
        }
        variants
    }

    /// Construct the group path portion (`org/foo`).
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }

    /// `name-version[-classifier].type`
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}-{}-{}.{}",
                self.name, self.version, c, self.artifact_type
            ),
            None => format!("{}-{}.{}", self.name, self.version, self.artifact_type),
        }
    }

    /// Full URL of this artifact under the given repository base.
    ///
    /// `<repo>/<group_path>/<name>/<version>/<file_name>`
    pub fn url(&self, repo_base: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/{}/{}",
            base,
            self.group_path(),
            self.name,
            self.version,
            self.file_name()
        )
    }

    /// Path relative to a Maven-layout repository root.
    pub fn local_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.group.split('.') {
            path.push(segment);
        }
        path.join(&self.name).join(&self.version).join(self.file_name())
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
