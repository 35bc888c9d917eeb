// ─── Resolution Mapping ───
// Coordinate key -> ordered local paths, loaded once from a properties resource.

pub mod properties;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{LocatorError, LocatorResult};

/// Read-only table from coordinate keys to one or more artifact paths
/// (e.g. primary jar followed by sources).
#[derive(Debug, Clone, Default)]
pub struct ResolutionMapping {
    source: PathBuf,
    entries: HashMap<String, Vec<PathBuf>>,
}

impl ResolutionMapping {
    /// Read and parse a mapping resource.
    ///
    /// Relative paths are resolved against the directory holding the resource.
    pub fn load(path: &Path) -> LocatorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| LocatorError::MappingRead {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mapping = Self::parse(&contents, path, base_dir)?;
        debug!(
            "Loaded {} dependency mappings from {:?}",
            mapping.len(),
            path
        );
        Ok(mapping)
    }

    /// Parse mapping contents. `source` is only used for error reporting.
    pub fn parse(contents: &str, source: &Path, base_dir: &Path) -> LocatorResult<Self> {
        let malformed = |line: usize, reason: String| LocatorError::MalformedMapping {
            path: source.to_path_buf(),
            line,
            reason,
        };

        let parsed = properties::parse(contents).map_err(|e| malformed(e.line, e.reason))?;

        let mut entries = HashMap::with_capacity(parsed.len());
        for entry in parsed {
            if entry.key.is_empty() {
                return Err(malformed(entry.line, "empty key".to_string()));
            }

            let paths: Vec<PathBuf> = std::env::split_paths(&entry.value)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| if p.is_absolute() { p } else { base_dir.join(p) })
                .collect();

            if paths.is_empty() {
                return Err(malformed(
                    entry.line,
                    format!("no path given for '{}'", entry.key),
                ));
            }

            entries.insert(entry.key, paths);
        }

        Ok(Self {
            source: source.to_path_buf(),
            entries,
        })
    }

    /// Every path recorded for `key`, in file order.
    pub fn get(&self, key: &str) -> Option<&[PathBuf]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
