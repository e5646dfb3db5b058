//! Application configuration loading from environment variables.
//!
//! Configuration is read once at startup and handed to the router through
//! [`AppState`](crate::presentation::http::state::AppState). Nothing reads the
//! environment after that point.
//!
//! # Environment Variables
//!
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 5000)
//! - `OPENAI_API_ENDPOINT`: Chat completion endpoint (default: OpenAI public API)
//! - `OPENAI_API_KEY`: Bearer credential for the provider (no default)
//! - `OPENAI_MODEL`: Vision model id (default: "gpt-4-vision-preview")
//! - `OPENAI_TIMEOUT_SECS`: Outbound request timeout (default: 60)
//! - `UPLOAD_DIR`: Directory for uploaded images (default: "uploads")
//! - `RETAIN_UPLOADS`: Keep uploaded files after analysis (default: true)
//! - `MAX_UPLOAD_BYTES`: Request body limit (default: 20 MiB)
//! - `RUST_LOG`: Logging filter (default: "info,season_api=debug,tower_http=debug")

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OPENAI_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-vision-preview";

/// Complete server configuration loaded from environment.
#[derive(Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Chat completion endpoint the analysis request is posted to
    pub openai_api_endpoint: String,

    /// Bearer token for the provider. Requests are still sent without it and
    /// the provider's rejection surfaces as a processing error.
    pub openai_api_key: Option<String>,

    /// Vision-capable model identifier placed in every payload
    pub openai_model: String,

    /// Upper bound on a single provider round trip, in seconds
    pub openai_timeout_secs: u64,

    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,

    /// Keep uploaded images on disk after the request completes
    pub retain_uploads: bool,

    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("openai_api_endpoint", &self.openai_api_endpoint)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_timeout_secs", &self.openai_timeout_secs)
            .field("upload_dir", &self.upload_dir)
            .field("retain_uploads", &self.retain_uploads)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the
    /// expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: env_or(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: env_or(&lookup, "PORT", 5000)?,
            openai_api_endpoint: env_or(
                &lookup,
                "OPENAI_API_ENDPOINT",
                DEFAULT_OPENAI_API_ENDPOINT.to_string(),
            )?,
            openai_api_key: env_optional(&lookup, "OPENAI_API_KEY"),
            openai_model: env_or(&lookup, "OPENAI_MODEL", DEFAULT_OPENAI_MODEL.to_string())?,
            openai_timeout_secs: env_or(&lookup, "OPENAI_TIMEOUT_SECS", 60)?,
            upload_dir: env_or(&lookup, "UPLOAD_DIR", PathBuf::from("uploads"))?,
            retain_uploads: env_or(&lookup, "RETAIN_UPLOADS", true)?,
            max_upload_bytes: env_or(&lookup, "MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
        })
    }

    pub fn openai_timeout(&self) -> Duration {
        Duration::from_secs(self.openai_timeout_secs)
    }
}

/// Load an optional variable, treating blank values as unset.
fn env_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|val| !val.trim().is_empty())
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(lookup, key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
