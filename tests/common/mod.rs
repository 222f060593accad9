//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use groupdrive::web::create_router;
use groupdrive::web::handlers::AppState;
use groupdrive::{FileStorage, GroupStore};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A test server over a fresh store rooted in a temporary directory.
///
/// Keep the `TempDir` alive for as long as the server is used.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<GroupStore>,
    pub dir: TempDir,
}

/// Create a test app with random group codes.
pub fn create_test_app() -> TestApp {
    build_app(GroupStore::new, None)
}

/// Create a test app whose group codes always come out as `code`.
pub fn create_test_app_with_code(code: &'static str) -> TestApp {
    build_app(
        move |storage| GroupStore::new(storage).with_code_generator(move || code.to_string()),
        None,
    )
}

/// Create a test app with a custom per-file upload limit in bytes.
pub fn create_test_app_with_limit(max_upload_size: u64) -> TestApp {
    build_app(GroupStore::new, Some(max_upload_size))
}

fn build_app(
    make_store: impl FnOnce(FileStorage) -> GroupStore,
    max_upload_size: Option<u64>,
) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::new(dir.path()).expect("Failed to create storage");
    let store = Arc::new(make_store(storage));

    let mut state = AppState::new(Arc::clone(&store));
    if let Some(limit) = max_upload_size {
        state = state.with_max_upload_size(limit);
    }

    let router = create_router(Arc::new(state), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, store, dir }
}

/// Create a group through the API and return its code.
pub async fn create_group(server: &TestServer, name: &str, username: &str) -> String {
    let response = server
        .post("/api/groups/create")
        .json(&json!({ "groupName": name, "username": username }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["code"]
        .as_str()
        .expect("code missing")
        .to_string()
}

/// Join a group through the API.
pub async fn join_group(server: &TestServer, code: &str, username: &str) -> Value {
    let response = server
        .post("/api/groups/join")
        .json(&json!({ "code": code, "username": username }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Multipart form for a single file upload.
pub fn upload_form(username: &str, folder: &str, name: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new()
        .add_text("username", username.to_string())
        .add_text("folder", folder.to_string())
        .add_part(
            "file",
            Part::bytes(content.to_vec())
                .file_name(name.to_string())
                .mime_type("application/octet-stream"),
        )
}

/// Upload one file and return its record from the response.
pub async fn upload_file(
    server: &TestServer,
    code: &str,
    username: &str,
    folder: &str,
    name: &str,
    content: &[u8],
) -> Value {
    let response = server
        .post(&format!("/api/groups/{}/files", code))
        .multipart(upload_form(username, folder, name, content))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["file"].clone()
}

/// File records of a group.
pub async fn list_files(server: &TestServer, code: &str) -> Vec<Value> {
    let response = server.get(&format!("/api/groups/{}/files", code)).await;
    response.assert_status_ok();
    response.json::<Value>()["files"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

/// Disk name of a file record.
pub fn filename_of(file: &Value) -> String {
    file["filename"].as_str().expect("filename missing").to_string()
}
