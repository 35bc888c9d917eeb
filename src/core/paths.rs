use std::path::{Path, PathBuf};

use tracing::debug;

const APP_DIR_NAME: &str = "artifact-locator";

/// Default location for artifacts downloaded by the remote resolver.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Find the first directory on `search_path` holding a file called `name`.
///
/// The returned path is canonicalized when possible.
pub fn find_resource(search_path: &[PathBuf], name: &str) -> Option<PathBuf> {
    search_path
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(|found| {
            debug!("Found resource {} at {:?}", name, found);
            safe_path(&found)
        })
}

/// Canonicalize a path, falling back to the path as given.
pub fn safe_path(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_directory_with_the_resource_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let third = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("deps.properties"), "a=b").unwrap();
        std::fs::write(third.path().join("deps.properties"), "a=c").unwrap();

        let search_path = vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            third.path().to_path_buf(),
        ];
        let found = find_resource(&search_path, "deps.properties").unwrap();
        assert_eq!(found, safe_path(&second.path().join("deps.properties")));
    }

    #[test]
    fn missing_resource_and_empty_search_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_resource(&[dir.path().to_path_buf()], "deps.properties").is_none());
        assert!(find_resource(&[], "deps.properties").is_none());
    }

    #[test]
    fn directories_with_the_resource_name_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("deps.properties")).unwrap();
        assert!(find_resource(&[dir.path().to_path_buf()], "deps.properties").is_none());
    }

    #[test]
    fn safe_path_keeps_missing_paths() {
        let missing = PathBuf::from("/definitely/not/here.jar");
        assert_eq!(safe_path(&missing), missing);
    }
}
