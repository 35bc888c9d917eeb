use std::path::Path;

use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{LocatorError, LocatorResult};
use crate::core::http::build_http_client;

/// Fetches artifacts into the local cache.
pub struct Downloader {
    client: Client,
    /// Maximum number of parallel downloads.
    concurrency: usize,
}

impl Downloader {
    pub fn new() -> LocatorResult<Self> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            concurrency: 4,
        }
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Download a single file to `dest`.
    ///
    /// Creates parent directories once the repository has answered with the
    /// artifact. The body goes to a uniquely named `.part` file in the same
    /// directory and is renamed into place, so `dest` never holds a partial
    /// artifact and concurrent downloads of the same file do not collide.
    pub async fn download_file(&self, url: &str, dest: &Path) -> LocatorResult<()> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;

        let parent = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(io_error(parent))?;

        let file_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        // Removed on drop unless persisted, including on every error below.
        let (std_file, partial) = tempfile::Builder::new()
            .prefix(&format!(".{}.", file_name))
            .suffix(".part")
            .tempfile_in(parent)
            .map_err(io_error(parent))?
            .into_parts();

        // Write inside a block so the handle is closed before the rename.
        {
            let mut file = tokio::fs::File::from_std(std_file);
            file.write_all(&bytes).await.map_err(io_error(&partial))?;
            file.flush().await.map_err(io_error(&partial))?;
        }

        if let Err(e) = partial.persist(dest) {
            // Another download of the same artifact finished first.
            if !dest.is_file() {
                return Err(io_error(dest)(e.error));
            }
            debug!("Kept existing {:?} after concurrent download", dest);
        }

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, bytes.len());
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LocatorError + '_ {
    move |source| LocatorError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Whether a download error means the repository simply lacks the artifact.
pub fn is_missing(err: &LocatorError) -> bool {
    matches!(
        err,
        LocatorError::DownloadFailed { status, .. } if *status == StatusCode::NOT_FOUND.as_u16()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::downloader::test_server::{local_client, TestServer};

    #[test]
    fn only_404_counts_as_missing() {
        let missing = LocatorError::DownloadFailed {
            url: "https://repo/a.jar".into(),
            status: 404,
        };
        let forbidden = LocatorError::DownloadFailed {
            url: "https://repo/a.jar".into(),
            status: 403,
        };
        assert!(is_missing(&missing));
        assert!(!is_missing(&forbidden));
        assert!(!is_missing(&LocatorError::NotFound("a:b:1".into())));
    }

    #[tokio::test]
    async fn download_lands_at_dest_without_leftovers() {
        let server = TestServer::start(vec![("/lib/a.jar", 200, b"artifact".to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/a.jar");

        Downloader::with_client(local_client())
            .download_file(&server.repo("/lib/a.jar"), &dest)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"artifact");
        let names: Vec<_> = std::fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.jar")]);
    }

    #[tokio::test]
    async fn failed_status_creates_nothing_on_disk() {
        let server = TestServer::start(vec![("/lib/broken.jar", 500, b"oops".to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::with_client(local_client());

        let missing = dir.path().join("org/foo/a.jar");
        let err = downloader
            .download_file(&server.repo("/lib/a.jar"), &missing)
            .await
            .unwrap_err();
        assert!(is_missing(&err));
        assert!(!dir.path().join("org").exists());

        let err = downloader
            .download_file(&server.repo("/lib/broken.jar"), &dir.path().join("b/broken.jar"))
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::DownloadFailed { status: 500, .. }));
        assert!(!dir.path().join("b").exists());
    }

    #[tokio::test]
    async fn concurrent_downloads_of_one_file_all_succeed() {
        let body = vec![7u8; 256 * 1024];
        let server = TestServer::start(vec![("/lib/big.jar", 200, body.clone())]).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("big.jar");
        let downloader = std::sync::Arc::new(Downloader::with_client(local_client()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let downloader = downloader.clone();
                let url = server.repo("/lib/big.jar");
                let dest = dest.clone();
                tokio::spawn(async move { downloader.download_file(&url, &dest).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(std::fs::read(&dest).unwrap(), body);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn concurrency_is_at_least_one() {
        let downloader = Downloader::with_client(Client::new()).with_concurrency(0);
        assert_eq!(downloader.concurrency(), 1);
    }
}
