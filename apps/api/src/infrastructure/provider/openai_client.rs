use super::{
    payload::{ChatCompletionRequest, ChatCompletionResponse},
    traits::VisionProvider,
};
use crate::{config::Config, domain::analysis::errors::AnalysisError};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Longest slice of a provider error body copied into logs.
const ERROR_BODY_PREVIEW: usize = 512;

/// OpenAI-compatible chat completion client.
///
/// One POST per analysis, no retries. The request timeout bounds how long a
/// slow provider can hold a handler.
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.openai_api_endpoint.clone(),
            config.openai_api_key.clone(),
            config.openai_timeout(),
        )
    }
}

fn transport_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        AnalysisError::Transport(format!("request timed out: {}", err))
    } else if err.is_connect() {
        AnalysisError::Transport(format!("connection failed: {}", err))
    } else {
        AnalysisError::Transport(err.to_string())
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl VisionProvider for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, AnalysisError> {
        let mut builder = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let response = builder.json(request).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %preview(&body), "Provider rejected request");
            return Err(AnalysisError::Provider {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        let content = parsed.into_content()?;

        debug!(content_length = content.len(), "Provider answered");
        Ok(content)
    }
}
