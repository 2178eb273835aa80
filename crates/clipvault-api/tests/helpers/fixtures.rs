//! Clip payloads and multipart forms for upload tests.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use sha2::{Digest, Sha256};

/// Deterministic non-trivial bytes standing in for a video file.
pub fn sample_clip(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| ((i * 31 + seed as usize) % 251) as u8)
        .collect()
}

/// First 16 hex characters of the SHA-256 digest.
pub fn truncated_sha256(data: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(data));
    digest[..16].to_string()
}

/// A form with a single `file` part.
pub fn clip_form(filename: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data)
            .file_name(filename)
            .mime_type("video/mp4"),
    )
}

/// Upload a clip and return its id, asserting success.
pub async fn upload_clip(client: &TestServer, filename: &str, data: Vec<u8>) -> String {
    let response = client
        .post("/upload")
        .multipart(clip_form(filename, data))
        .await;
    assert_eq!(response.status_code(), 200, "upload failed: {}", response.text());

    let body: serde_json::Value = response.json();
    body["clip_id"]
        .as_str()
        .expect("clip_id missing from upload response")
        .to_string()
}
