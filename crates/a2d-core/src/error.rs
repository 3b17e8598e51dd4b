//! Error types for Apps2Desktop.
//!
//! Every internal operation returns [`Result`]. The scripting-facing verbs in
//! [`crate::api`] collapse these into a plain `bool`, so the variants here exist
//! for logging and for callers that use the typed API directly.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Apps2Desktop library.
#[derive(Debug, Error)]
pub enum A2dError {
    // Manifest errors
    #[error("Extension manifest not found: {path:?}")]
    ManifestMissing { path: PathBuf },

    #[error("Malformed extension manifest {path:?}: {message}")]
    ManifestMalformed {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Extension directory not found for app {app_id}")]
    ExtensionDirNotFound { app_id: String },

    // Desktop entry state
    #[error("Desktop entry for {app_id} is already at version {version}")]
    EntryAlreadyCurrent { app_id: String, version: String },

    #[error("Desktop entry not found for app {app_id}")]
    EntryNotFound { app_id: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Failed to create symlink from {src} to {dest}: {reason}")]
    SymlinkFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for Apps2Desktop operations.
pub type Result<T> = std::result::Result<T, A2dError>;

impl From<std::io::Error> for A2dError {
    fn from(err: std::io::Error) -> Self {
        A2dError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl A2dError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        A2dError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an IO error with an operation description and path context.
    pub fn io_context(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        err: std::io::Error,
    ) -> Self {
        A2dError::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Whether this outcome is a routine no-op rather than a failure.
    ///
    /// The browser replays `add` for every installed app on start-up and fires
    /// `remove`/`enable`/`disable` for apps that may never have had an entry,
    /// so these are logged quietly.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            A2dError::EntryAlreadyCurrent { .. } | A2dError::EntryNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = A2dError::EntryNotFound {
            app_id: "abcdef".into(),
        };
        assert_eq!(err.to_string(), "Desktop entry not found for app abcdef");
    }

    #[test]
    fn test_expected_errors() {
        assert!(A2dError::EntryAlreadyCurrent {
            app_id: "a".into(),
            version: "1.0".into()
        }
        .is_expected());
        assert!(!A2dError::ManifestMissing {
            path: PathBuf::from("/tmp/manifest.json")
        }
        .is_expected());
    }

    #[test]
    fn test_io_with_path_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        match A2dError::io_with_path(io, "/tmp/x.desktop") {
            A2dError::Io { path, source, .. } => {
                assert_eq!(path, Some(PathBuf::from("/tmp/x.desktop")));
                assert!(source.is_some());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
