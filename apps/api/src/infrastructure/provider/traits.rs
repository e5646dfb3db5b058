use super::payload::ChatCompletionRequest;
use crate::domain::analysis::errors::AnalysisError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Send one chat completion request and return the first choice's text.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, AnalysisError>;
}
