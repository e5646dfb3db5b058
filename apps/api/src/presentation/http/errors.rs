//! HTTP error handling and response conversion.
//!
//! Handler failures are mapped to a status code and a short plain-text body.
//! Provider failures of every kind share one body; the detail goes to the log.

use crate::domain::analysis::errors::AnalysisError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

pub const MISSING_IMAGE_MESSAGE: &str = "No image provided";
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing request";
pub const INVALID_MULTIPART_MESSAGE: &str = "Invalid multipart request";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// No usable `image` part in the form (400).
    MissingImage,

    /// Multipart body could not be read (400, or 413 past the body limit).
    Multipart(MultipartError),

    /// Provider rejected the request, was unreachable or answered garbage (500).
    Provider {
        kind: &'static str,
        detail: String,
    },

    /// Upload could not be stored or read back (500).
    Storage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingImage => write!(f, "Missing image"),
            Self::Multipart(err) => write!(f, "Multipart error: {}", err),
            Self::Provider { kind, detail } => write!(f, "Provider error ({}): {}", kind, detail),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingImage => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::Provider { .. } | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::MissingImage => MISSING_IMAGE_MESSAGE.into(),
            // multer's wording stays in the log
            Self::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                PAYLOAD_TOO_LARGE_MESSAGE.into()
            }
            Self::Multipart(_) => INVALID_MULTIPART_MESSAGE.into(),
            Self::Provider { .. } | Self::Storage(_) => PROCESSING_ERROR_MESSAGE.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        if status.is_server_error() {
            tracing::error!("error={}", self);
        } else {
            tracing::warn!("error={}", self);
        }

        (status, message).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let kind = err.kind();
        match err {
            AnalysisError::MissingImage => AppError::MissingImage,
            AnalysisError::Storage(msg) => AppError::Storage(msg),
            AnalysisError::Provider { .. }
            | AnalysisError::Transport(_)
            | AnalysisError::MalformedResponse(_) => AppError::Provider {
                kind,
                detail: err.to_string(),
            },
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart(err)
    }
}
