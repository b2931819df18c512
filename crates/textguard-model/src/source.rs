//! Model source configuration

use std::path::PathBuf;

/// Where the model artifact comes from. Resolved once at startup.
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Pre-extracted artifact directory on the local filesystem
    LocalDir(PathBuf),

    /// HTTP(S) URL of a ZIP archive containing the artifact directory
    RemoteArchive { url: String },
}

impl ModelSource {
    /// Create a source from a local artifact directory.
    pub fn from_local(path: impl Into<PathBuf>) -> Self {
        Self::LocalDir(path.into())
    }

    /// Create a source from a remote archive URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::RemoteArchive { url: url.into() }
    }

    /// Parse a CLI-style location: HTTP(S) URLs select remote mode,
    /// anything else is treated as a local directory.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::from_url(location)
        } else {
            Self::from_local(location)
        }
    }

    /// Human-readable description for logs and status endpoints.
    pub fn describe(&self) -> String {
        match self {
            Self::LocalDir(path) => format!("local directory {}", path.display()),
            Self::RemoteArchive { url } => format!("remote archive {url}"),
        }
    }
}
