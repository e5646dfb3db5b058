use crate::domain::analysis::entity::UploadedImage;

/// Form fields of one `/analyze` call.
///
/// Colors are passed through unvalidated; `image` is `None` when the form
/// carried no file part.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub image: Option<UploadedImage>,
}
