mod artifact;

pub use artifact::{ArtifactCoordinate, DEFAULT_TYPE};

/// Repository used by the remote resolver when none are configured.
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";
