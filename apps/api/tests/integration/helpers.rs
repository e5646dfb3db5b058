use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use season_api::{
    config::Config,
    infrastructure::{
        provider::openai_client::OpenAiClient, storage::local_upload_store::LocalUploadStore,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_API_KEY: &str = "test-key";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub struct TestApp {
    pub app: Router,
    pub upload_dir: PathBuf,
    // Keeps the upload directory alive for the test's duration
    _tmp: TempDir,
}

pub struct TestOptions {
    pub retain_uploads: bool,
    pub timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            retain_uploads: true,
            timeout: Duration::from_secs(10),
            max_upload_bytes: 1024 * 1024,
        }
    }
}

fn build_config(endpoint: &str, upload_dir: PathBuf, options: &TestOptions) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        openai_api_endpoint: endpoint.to_string(),
        openai_api_key: Some(TEST_API_KEY.to_string()),
        openai_model: "gpt-4-vision-preview".to_string(),
        openai_timeout_secs: options.timeout.as_secs(),
        upload_dir,
        retain_uploads: options.retain_uploads,
        max_upload_bytes: options.max_upload_bytes,
    }
}

pub async fn spawn_app(endpoint: &str) -> TestApp {
    spawn_app_with(endpoint, TestOptions::default()).await
}

pub async fn spawn_app_with(endpoint: &str, options: TestOptions) -> TestApp {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let upload_dir = tmp.path().join("uploads");
    let config = build_config(endpoint, upload_dir.clone(), &options);

    let uploads = LocalUploadStore::new(&config.upload_dir, config.retain_uploads)
        .await
        .expect("failed to create upload store");
    let provider = OpenAiClient::new(
        config.openai_api_endpoint.clone(),
        config.openai_api_key.clone(),
        options.timeout,
    )
    .expect("failed to build provider client");

    let state = AppState {
        config,
        uploads: Arc::new(uploads),
        provider: Arc::new(provider),
    };

    TestApp {
        app: create_router(state),
        upload_dir,
        _tmp: tmp,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// One multipart file part: (filename, content type, bytes).
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn multipart_analyze_body(
    hair_color: Option<&str>,
    eye_color: Option<&str>,
    image: Option<FilePart<'_>>,
) -> (String, Vec<u8>) {
    let boundary = format!("----season-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    let mut push_text = |name: &str, value: &str| {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    };

    if let Some(hair) = hair_color {
        push_text("hair_color", hair);
    }
    if let Some(eye) = eye_color {
        push_text("eye_color", eye);
    }

    if let Some((filename, content_type, bytes)) = image {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn analyze_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build analyze request")
}

pub fn uploaded_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("upload dir missing")
        .map(|entry| {
            entry
                .expect("bad dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
