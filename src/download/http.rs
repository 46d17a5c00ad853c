use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Downloader;
use crate::error::MovingMnistError;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches URLs over HTTP into a local download directory.
///
/// A file already present in the directory is returned as-is. Partial
/// downloads are written next to the target with an `.incomplete` suffix
/// and only renamed into place once the body has been fully read.
#[derive(Clone, Debug)]
pub struct HttpDownloader {
    download_dir: PathBuf,
    connect_timeout: Duration,
}

impl HttpDownloader {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Where `url` is (or would be) cached.
    pub fn cached_path(&self, url: &str) -> Result<PathBuf, MovingMnistError> {
        let parsed = url::Url::parse(url).map_err(|source| MovingMnistError::Download {
            url: url.to_string(),
            message: format!("invalid URL: {source}"),
        })?;
        let file_name = parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
            .ok_or_else(|| MovingMnistError::Download {
                url: url.to_string(),
                message: "URL has no file name to cache under".to_string(),
            })?;
        Ok(self.download_dir.join(file_name))
    }

    fn fetch(&self, url: &str, target: &Path) -> Result<u64, String> {
        fs::create_dir_all(&self.download_dir).map_err(|source| {
            format!(
                "cannot create download dir '{}': {source}",
                self.download_dir.display()
            )
        })?;

        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(self.connect_timeout))
            .build();
        let agent: ureq::Agent = config.into();

        let mut response = agent.get(url).call().map_err(|source| source.to_string())?;

        let partial = partial_path(target);
        let file = File::create(&partial)
            .map_err(|source| format!("cannot create '{}': {source}", partial.display()))?;
        let mut writer = BufWriter::new(file);

        let mut reader = response.body_mut().as_reader();
        let copied = std::io::copy(&mut reader, &mut writer).and_then(|bytes| {
            writer.flush()?;
            Ok(bytes)
        });
        let bytes = match copied {
            Ok(bytes) => bytes,
            Err(source) => {
                let _ = fs::remove_file(&partial);
                return Err(format!("failed reading response body: {source}"));
            }
        };
        drop(writer);

        commit_partial(&partial, target)?;
        Ok(bytes)
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<PathBuf, MovingMnistError> {
        let target = self.cached_path(url)?;
        if target.is_file() {
            log::info!("using cached {}", target.display());
            return Ok(target);
        }

        log::info!("downloading {} to {}", url, target.display());
        let bytes = self
            .fetch(url, &target)
            .map_err(|message| MovingMnistError::Download {
                url: url.to_string(),
                message,
            })?;
        log::info!("downloaded {bytes} bytes from {url}");
        Ok(target)
    }
}

/// Moves a finished download into place, discarding it if the move fails.
fn commit_partial(partial: &Path, target: &Path) -> Result<(), String> {
    fs::rename(partial, target).map_err(|source| {
        let _ = fs::remove_file(partial);
        format!(
            "cannot move '{}' to '{}': {source}",
            partial.display(),
            target.display()
        )
    })
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".incomplete");
    PathBuf::from(name)
}
