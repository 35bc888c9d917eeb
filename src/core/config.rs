use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{LocatorError, LocatorResult};
use crate::core::maven::MAVEN_CENTRAL;
use crate::core::paths::default_cache_dir;

/// Name of the override mapping resource looked up on the search path.
pub const OVERRIDE_RESOURCE_NAME: &str = "artifact-deps.properties";

/// Registry name of the default online resolver.
pub const MAVEN_CACHED_RESOLVER: &str = "maven-cached";

pub const ENV_OFFLINE: &str = "ARTIFACT_LOCATOR_OFFLINE";
pub const ENV_DEPS_PROPERTIES: &str = "ARTIFACT_LOCATOR_DEPS_PROPERTIES";
pub const ENV_DEPENDENCY_DIR: &str = "ARTIFACT_LOCATOR_DEPENDENCY_DIR";
pub const ENV_LAYOUT: &str = "ARTIFACT_LOCATOR_LAYOUT";
pub const ENV_RESOURCE_PATH: &str = "ARTIFACT_LOCATOR_RESOURCE_PATH";
pub const ENV_ONLINE_RESOLVER: &str = "ARTIFACT_LOCATOR_ONLINE_RESOLVER";
pub const ENV_CACHE_DIR: &str = "ARTIFACT_LOCATOR_CACHE_DIR";
pub const ENV_REPOSITORIES: &str = "ARTIFACT_LOCATOR_REPOSITORIES";

/// On-disk arrangement used by convention-based resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyLayout {
    /// `<dir>/<name>-<version>[-classifier].<type>`
    #[default]
    Flat,
    /// `<dir>/<group path>/<name>/<version>/<file>`
    Maven,
}

impl std::str::FromStr for DependencyLayout {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "maven" => Ok(Self::Maven),
            _ => Err(LocatorError::InvalidSetting {
                key: ENV_LAYOUT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the chain builder needs to pick and assemble its layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub offline: bool,
    /// Mapping resource used as the sole offline resolver when set.
    pub deps_properties: Option<PathBuf>,
    /// Base directory for convention-based resolution.
    pub dependency_dir: PathBuf,
    pub dependency_layout: DependencyLayout,
    /// Directories searched for the override resource, in priority order.
    pub resource_path: Vec<PathBuf>,
    /// Registry name of the resolver used when not offline.
    pub online_resolver: String,
    pub cache_dir: PathBuf,
    pub repositories: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            offline: false,
            deps_properties: None,
            dependency_dir: PathBuf::from("."),
            dependency_layout: DependencyLayout::Flat,
            resource_path: Vec::new(),
            online_resolver: MAVEN_CACHED_RESOLVER.to_string(),
            cache_dir: default_cache_dir(),
            repositories: vec![MAVEN_CENTRAL.to_string()],
        }
    }
}

impl LocatorConfig {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> LocatorResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LocatorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> LocatorResult<Self> {
        Self::default().with_vars(std::env::vars())
    }

    /// Overlay `ARTIFACT_LOCATOR_*` variables on top of this configuration.
    pub fn with_vars<I>(mut self, vars: I) -> LocatorResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_OFFLINE => self.offline = parse_bool(&key, &value)?,
                ENV_DEPS_PROPERTIES => {
                    self.deps_properties = non_empty(&value).map(PathBuf::from)
                }
                ENV_DEPENDENCY_DIR => {
                    self.dependency_dir = PathBuf::from(non_empty(&value).unwrap_or("."))
                }
                ENV_LAYOUT => self.dependency_layout = value.parse()?,
                ENV_RESOURCE_PATH => {
                    self.resource_path = std::env::split_paths(&value)
                        .filter(|p| !p.as_os_str().is_empty())
                        .collect()
                }
                ENV_ONLINE_RESOLVER => {
                    self.online_resolver = non_empty(&value)
                        .ok_or_else(|| invalid(&key, &value))?
                        .to_string()
                }
                ENV_CACHE_DIR => {
                    self.cache_dir =
                        PathBuf::from(non_empty(&value).ok_or_else(|| invalid(&key, &value))?)
                }
                ENV_REPOSITORIES => {
                    self.repositories = value
                        .split(',')
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .map(str::to_string)
                        .collect()
                }
                _ => {}
            }
        }
        Ok(self)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn invalid(key: &str, value: &str) -> LocatorError {
    LocatorError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> LocatorResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
