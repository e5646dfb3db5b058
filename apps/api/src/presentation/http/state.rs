use crate::{
    application::analyze_image::use_case::AnalyzeImageUseCase,
    config::Config,
    infrastructure::{provider::traits::VisionProvider, storage::traits::UploadStore},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: Arc<dyn UploadStore>,
    pub provider: Arc<dyn VisionProvider>,
}

impl AppState {
    pub fn analyze_use_case(&self) -> AnalyzeImageUseCase {
        AnalyzeImageUseCase::new(
            self.uploads.clone(),
            self.provider.clone(),
            self.config.openai_model.clone(),
        )
    }
}
