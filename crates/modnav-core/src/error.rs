use std::path::PathBuf;
use thiserror::Error;

/// Core error type for modnav operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read manifest at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid manifest at {path}: {message}")]
    ManifestInvalid { path: PathBuf, message: String },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether this error came from the project manifest.
    #[must_use]
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            Self::ManifestRead { .. } | Self::ManifestParse { .. } | Self::ManifestInvalid { .. }
        )
    }
}

/// Result alias for modnav operations.
pub type Result<T> = std::result::Result<T, Error>;
