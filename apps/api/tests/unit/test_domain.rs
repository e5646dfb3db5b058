use season_api::{
    domain::analysis::{
        entity::{ColorSeasonDescription, UploadedImage},
        errors::AnalysisError,
        value_objects::SanitizedFilename,
    },
    infrastructure::provider::payload::{build_payload, color_prompt, encode_image},
};
use serde_json::json;

#[test]
fn sanitized_filename_rewrites_traversal() {
    let name = SanitizedFilename::new("../../etc/passwd");
    assert_eq!(name.as_str(), "etc_passwd");
    assert_eq!(name.to_string(), "etc_passwd");
}

#[test]
fn uploaded_image_without_name_has_no_filename() {
    assert!(!UploadedImage::new("", &b"abc"[..]).has_filename());
    assert!(UploadedImage::new("a.jpg", &b"abc"[..]).has_filename());
}

#[test]
fn description_serializes_as_single_field() {
    let body = serde_json::to_value(ColorSeasonDescription {
        description: "Autumn".into(),
    })
    .unwrap();
    assert_eq!(body, json!({ "description": "Autumn" }));
}

#[test]
fn prompt_embeds_colors() {
    assert_eq!(
        color_prompt(Some("blonde"), Some("blue")),
        "hair color is blonde and eye color is blue. which is the color season?"
    );
}

#[test]
fn payload_user_prompt_contains_colors() {
    let payload = build_payload("gpt-4-vision-preview", Some("blonde"), Some("blue"), "");
    let text = serde_json::to_string(&payload).unwrap();
    assert!(text.contains("hair color is blonde and eye color is blue. which is the color season?"));
}

#[test]
fn encode_known_bytes() {
    assert_eq!(encode_image(b"hello world"), "aGVsbG8gd29ybGQ=");
}

#[test]
fn error_kinds_are_distinct() {
    let kinds = [
        AnalysisError::MissingImage.kind(),
        AnalysisError::Storage("x".into()).kind(),
        AnalysisError::Provider {
            status: 500,
            message: "x".into(),
        }
        .kind(),
        AnalysisError::Transport("x".into()).kind(),
        AnalysisError::MalformedResponse("x".into()).kind(),
    ];
    for (i, a) in kinds.iter().enumerate() {
        for b in &kinds[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
