//! Clip API integration tests.
//!
//! Run with: `cargo test -p clipvault-api --test clips_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{clip_form, sample_clip, truncated_sha256, upload_clip};
use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_index_describes_service() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["service"], "Screen Clip Storage Server");
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["endpoints"].as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_starts_empty() {
    let app = setup_test_app().await;

    let response = app.client().get("/clips").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), serde_json::json!({ "clips": [] }));
}

#[tokio::test]
async fn test_upload_returns_links() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(clip_form("Screen Recording.mp4", sample_clip(4096, 1)))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let clip_id = body["clip_id"].as_str().unwrap();
    assert_eq!(clip_id.len(), 8);
    assert!(clip_id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Clip uploaded successfully");
    assert_eq!(body["url"], format!("http://clips.test/view/{}", clip_id));
    assert_eq!(
        body["download_url"],
        format!("http://clips.test/clips/{}", clip_id)
    );
}

#[tokio::test]
async fn test_upload_then_list_records_size_and_hash() {
    let app = setup_test_app().await;
    let data = sample_clip(10_000, 7);

    let clip_id = upload_clip(app.client(), "capture.MOV", data.clone()).await;

    let body: Value = app.client().get("/clips").await.json();
    let clips = body["clips"].as_array().unwrap();
    assert_eq!(clips.len(), 1);

    let record = &clips[0];
    assert_eq!(record["clip_id"], clip_id.as_str());
    assert_eq!(record["filename"], format!("{}.mov", clip_id));
    assert_eq!(record["original_filename"], "capture.MOV");
    assert_eq!(record["file_size"], 10_000);
    assert_eq!(record["file_hash"], truncated_sha256(&data));
    assert_eq!(record["url"], format!("http://clips.test/clips/{}", clip_id));
    assert!(record["upload_time"].as_str().unwrap().contains('T'));

    assert_eq!(app.stored_files(), vec![format!("{}.mov", clip_id)]);
}

#[tokio::test]
async fn test_upload_then_download_is_byte_identical() {
    let app = setup_test_app().await;
    let data = sample_clip(65_537, 3);

    let clip_id = upload_clip(app.client(), "demo.mp4", data.clone()).await;

    let response = app.client().get(&format!("/clips/{}", clip_id)).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "video/mp4");
    assert_eq!(response.header("content-length"), "65537");
    assert_eq!(
        response.header("content-disposition"),
        format!("inline; filename=\"{}.mp4\"", clip_id).as_str()
    );
    assert_eq!(response.as_bytes().as_ref(), data.as_slice());
}

#[tokio::test]
async fn test_download_unknown_clip_is_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get("/clips/deadbeef").await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Clip not found");
}

#[tokio::test]
async fn test_delete_removes_blob_and_record() {
    let app = setup_test_app().await;
    let keep = upload_clip(app.client(), "keep.webm", sample_clip(512, 1)).await;
    let gone = upload_clip(app.client(), "gone.mkv", sample_clip(512, 2)).await;

    let response = app.client().delete(&format!("/delete/{}", gone)).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], format!("Clip {} deleted", gone));

    let listed: Value = app.client().get("/clips").await.json();
    let ids: Vec<&str> = listed["clips"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["clip_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![keep.as_str()]);
    assert_eq!(app.stored_files(), vec![format!("{}.webm", keep)]);

    let response = app.client().get(&format!("/clips/{}", gone)).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_unknown_clip_is_not_found() {
    let app = setup_test_app().await;
    upload_clip(app.client(), "keep.mp4", sample_clip(128, 1)).await;
    let before = std::fs::read(app.metadata_path()).unwrap();

    let response = app.client().delete("/delete/ffffffff").await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Clip not found");

    assert_eq!(std::fs::read(app.metadata_path()).unwrap(), before);
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn test_upload_rejects_disallowed_extension() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(clip_form("evil.exe", sample_clip(256, 1)))
        .await;
    assert_eq!(response.status_code(), 400);

    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Invalid file type. Allowed:"));
    assert!(error.contains(".mp4"));

    assert!(app.stored_files().is_empty());
    let listed: Value = app.client().get("/clips").await.json();
    assert!(listed["clips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_rejects_empty_filename() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(clip_form("", sample_clip(256, 1)))
        .await;
    assert_eq!(response.status_code(), 400);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(MultipartForm::new().add_text("title", "my clip"))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "No file provided");

    let response = app
        .client()
        .post("/upload")
        .json(&serde_json::json!({ "file": "clip.mp4" }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "No file provided");

    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_view_page_redirects() {
    let app = setup_test_app().await;

    let response = app.client().get("/view/a1b2c3d4").await;
    assert_eq!(response.status_code(), 200);
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response.text().contains("url=/?clip=a1b2c3d4"));
}

#[tokio::test]
async fn test_openapi_lists_clip_routes() {
    let app = setup_test_app().await;

    let spec: Value = app.client().get("/api/openapi.json").await.json();
    let paths = spec["paths"].as_object().unwrap();
    for path in ["/upload", "/clips", "/clips/{clip_id}", "/delete/{clip_id}"] {
        assert!(paths.contains_key(path), "missing {}", path);
    }

    let response = app.client().get("/docs").await;
    assert_eq!(response.status_code(), 200);
}
