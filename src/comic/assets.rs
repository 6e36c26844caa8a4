use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("asset location {path} is unreachable: {source}")]
    Unreachable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed asset entry: {0}")]
    Malformed(String),
}

/// A discovered image and where it can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub filename: String,
    pub url: String,
}

/// A read-only listing of comic images at a known location.
pub trait AssetSource {
    fn discover(&self) -> Result<Vec<Asset>, DiscoveryError>;

    /// Location of a file under this source, whether or not it was discovered.
    fn locate(&self, filename: &str) -> String;
}

/// Comic images stored in a local directory and served under `url_prefix`.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    directory: PathBuf,
    url_prefix: String,
}

impl DirectoryAssets {
    pub fn new(directory: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            directory: directory.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn unreachable(&self, source: io::Error) -> DiscoveryError {
        DiscoveryError::Unreachable {
            path: self.directory.clone(),
            source,
        }
    }
}

impl AssetSource for DirectoryAssets {
    fn discover(&self) -> Result<Vec<Asset>, DiscoveryError> {
        debug!("Scanning {} for comic pages", self.directory.display());
        let entries = std::fs::read_dir(&self.directory).map_err(|e| self.unreachable(e))?;

        let mut assets = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| self.unreachable(e))?.path();
            if !path.is_file() || !is_image(&path) {
                continue;
            }
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| DiscoveryError::Malformed(path.display().to_string()))?;
            assets.push(Asset {
                filename: filename.to_string(),
                url: self.locate(filename),
            });
        }
        Ok(assets)
    }

    fn locate(&self, filename: &str) -> String {
        format!("{}/{}", self.url_prefix, filename)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
