//! Test helpers: build AppState and router for integration tests.
//!
//! Each app gets its own temporary directory holding the metadata document and the
//! upload folder. Run with `cargo test -p clipvault-api`.

pub mod fixtures;

use axum_test::TestServer;
use clipvault_api::setup::{build_state, routes};
use clipvault_core::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server, effective config, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub _temp_dir: Arc<TempDir>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn metadata_path(&self) -> PathBuf {
        PathBuf::from(&self.config.metadata_file)
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.upload_folder)
    }

    /// Names of every file currently in the upload folder, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// A fresh process over the same directories: new state, new router.
    pub async fn restart(&self) -> TestApp {
        build_test_app(self.config.clone(), self._temp_dir.clone()).await
    }
}

/// Setup test app with default limits.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust the config before the stores are opened.
pub async fn setup_test_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = Arc::new(tempfile::tempdir().expect("Failed to create temp dir"));

    let mut config = Config {
        base_url: "http://clips.test".to_string(),
        metadata_file: temp_dir
            .path()
            .join("clips_metadata.json")
            .to_string_lossy()
            .into_owned(),
        upload_folder: temp_dir.path().join("uploads").to_string_lossy().into_owned(),
        ..Config::default()
    };
    customize(&mut config);

    build_test_app(config, temp_dir).await
}

async fn build_test_app(config: Config, temp_dir: Arc<TempDir>) -> TestApp {
    let state = build_state(&config)
        .await
        .expect("Failed to build app state");
    let router = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        config,
        _temp_dir: temp_dir,
    }
}
