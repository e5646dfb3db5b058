use thiserror::Error;

/// Failures of a single image analysis.
///
/// `Provider`, `Transport` and `MalformedResponse` all reach the caller as the
/// same processing error; they stay separate so logs can tell them apart.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No image provided")]
    MissingImage,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("Provider unreachable: {0}")]
    Transport(String),
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingImage => "missing_image",
            Self::Storage(_) => "storage",
            Self::Provider { .. } => "provider_status",
            Self::Transport(_) => "provider_transport",
            Self::MalformedResponse(_) => "provider_malformed",
        }
    }
}
