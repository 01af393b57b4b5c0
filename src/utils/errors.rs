use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhantomJsError>;

/// Everything that can go wrong while resolving a phantomjs binary. A probe
/// that simply finds nothing is not an error; see `Resolution::NotFound`.
#[derive(Debug, Error)]
pub enum PhantomJsError {
    #[error("invalid phantomjs version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("unable to download phantomjs binary from {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("unable to extract phantomjs binary from {}: {reason}", archive.display())]
    Extraction { archive: PathBuf, reason: String },

    #[error("unable to create directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to check {} on system path: {reason}", binary.display())]
    Probe { binary: PathBuf, reason: String },

    #[error("phantomjs {version} not found by any configured resolver")]
    NotFound { version: String },

    #[error("could not load configuration: {0}")]
    Config(String),
}

impl PhantomJsError {
    pub fn download(url: impl Into<String>, reason: impl Display) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(archive: &Path, reason: impl Display) -> Self {
        Self::Extraction {
            archive: archive.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn probe(binary: &Path, reason: impl Display) -> Self {
        Self::Probe {
            binary: binary.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
