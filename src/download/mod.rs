//! Download capability handed to the adapter.
//!
//! The adapter only asks for "a local path for this URL". Caching, timeouts
//! and transport live in the [`Downloader`] implementations here. None of
//! them retry.

#[cfg(feature = "remote")]
pub mod http;

use std::path::{Path, PathBuf};

use crate::error::MovingMnistError;

#[cfg(feature = "remote")]
pub use http::HttpDownloader;

/// Resolves a remote URL to a local file.
pub trait Downloader {
    /// Returns the local path of `url`, fetching it if needed.
    ///
    /// # Errors
    /// Returns [`MovingMnistError::Download`] if the file cannot be fetched.
    fn download(&self, url: &str) -> Result<PathBuf, MovingMnistError>;
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn download(&self, url: &str) -> Result<PathBuf, MovingMnistError> {
        (**self).download(url)
    }
}

/// Serves a file the user already has on disk, whatever the URL.
#[derive(Clone, Debug)]
pub struct PrefetchedDownloader {
    path: PathBuf,
}

impl PrefetchedDownloader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Downloader for PrefetchedDownloader {
    fn download(&self, url: &str) -> Result<PathBuf, MovingMnistError> {
        if !self.path.is_file() {
            return Err(MovingMnistError::Download {
                url: url.to_string(),
                message: format!("prefetched file '{}' does not exist", self.path.display()),
            });
        }
        log::info!("using prefetched {} for {}", self.path.display(), url);
        Ok(self.path.clone())
    }
}
