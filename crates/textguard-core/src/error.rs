//! Error types for TextGuard

/// Result type alias using TextGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TextGuard operations.
///
/// Every failure in the provisioning/inference pipeline maps to exactly one
/// of these kinds, and none of them are retried internally. Callers decide
/// whether to retry by invoking the operation again.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network/HTTP failure while fetching the remote model archive
    #[error("download error: {0}")]
    Download(String),

    /// Downloaded archive is corrupt, empty, or unreadable
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Model artifact missing, misnamed, or malformed at load time
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Model invocation failed at call time
    #[error("inference error: {0}")]
    Inference(String),
}

impl Error {
    /// Create a new download error
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    /// Create a new extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Stable machine-readable kind, for surfacing the specific failure
    /// to the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Download(_) => "download",
            Self::Extraction(_) => "extraction",
            Self::ModelLoad(_) => "model_load",
            Self::Inference(_) => "inference",
        }
    }
}
