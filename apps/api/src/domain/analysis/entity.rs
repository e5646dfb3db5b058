use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An image file received in a multipart form, with its client-supplied name.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// A part without a filename is treated the same as no part at all.
    pub fn has_filename(&self) -> bool {
        !self.filename.is_empty()
    }
}

/// The provider's answer, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSeasonDescription {
    pub description: String,
}
