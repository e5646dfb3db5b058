use crate::{
    application::analyze_image::dto::AnalysisRequest,
    domain::analysis::{
        entity::ColorSeasonDescription, errors::AnalysisError, value_objects::SanitizedFilename,
    },
    infrastructure::{
        provider::{
            payload::{build_payload, encode_image},
            traits::VisionProvider,
        },
        storage::traits::UploadStore,
    },
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Runs one color season analysis end to end.
///
/// The flow is strictly linear: store the upload, read it back, encode it,
/// send one chat completion request and hand back the first answer. There is
/// no retry and no partial result; the stored file handle lives until the
/// provider has answered.
pub struct AnalyzeImageUseCase {
    uploads: Arc<dyn UploadStore>,
    provider: Arc<dyn VisionProvider>,
    model: String,
}

impl AnalyzeImageUseCase {
    pub fn new(
        uploads: Arc<dyn UploadStore>,
        provider: Arc<dyn VisionProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            uploads,
            provider,
            model: model.into(),
        }
    }

    /// # Errors
    /// - `MissingImage` when no file part was sent or its filename is empty
    /// - `Storage` when the upload cannot be written or read back
    /// - `Provider`, `Transport` or `MalformedResponse` from the provider call
    #[instrument(skip(self, request), fields(
        filename = tracing::field::Empty,
        image_size = tracing::field::Empty,
    ))]
    pub async fn execute(
        &self,
        request: AnalysisRequest,
    ) -> Result<ColorSeasonDescription, AnalysisError> {
        let image = request
            .image
            .filter(|image| image.has_filename())
            .ok_or(AnalysisError::MissingImage)?;

        let filename = SanitizedFilename::new(&image.filename);
        let span = tracing::Span::current();
        span.record("filename", filename.as_str());
        span.record("image_size", image.data.len());

        let stored = self
            .uploads
            .save(&filename, &image.data)
            .await
            .map_err(|e| AnalysisError::Storage(format!("{:#}", e)))?;

        let bytes = self
            .uploads
            .read(&stored)
            .await
            .map_err(|e| AnalysisError::Storage(format!("{:#}", e)))?;
        let encoded = encode_image(&bytes);
        debug!(encoded_len = encoded.len(), "Encoded upload");

        let payload = build_payload(
            &self.model,
            request.hair_color.as_deref(),
            request.eye_color.as_deref(),
            &encoded,
        );

        let description = self.provider.complete(&payload).await?;
        info!(description_length = description.len(), "Analysis complete");

        drop(stored);
        Ok(ColorSeasonDescription { description })
    }
}
