//! Web API Folder and Comment Tests
//!
//! Integration tests for folder operations, the folder tree and comment threads.

mod common;

use axum::http::StatusCode;
use common::{create_group, create_test_app, filename_of, list_files, upload_file};
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_folder() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    let response = app
        .server
        .post(&format!("/api/groups/{}/folders/create", code))
        .json(&json!({ "parentFolder": "", "folderName": "docs" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);

    app.server
        .post(&format!("/api/groups/{}/folders/create", code))
        .json(&json!({ "parentFolder": "docs", "folderName": "drafts" }))
        .await
        .assert_status_ok();

    assert!(app.dir.path().join(&code).join("docs/drafts").is_dir());

    let folders: Value = app
        .server
        .get(&format!("/api/groups/{}/folders", code))
        .await
        .json();
    assert_eq!(folders["folders"], json!(["docs", "docs/drafts"]));
}

#[tokio::test]
async fn test_create_folder_without_name() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    let response = app
        .server
        .post(&format!("/api/groups/{}/folders/create", code))
        .json(&json!({ "parentFolder": "docs" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "folderName is required");
}

#[tokio::test]
async fn test_tree_places_file_at_its_folder() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;
    upload_file(&app.server, &code, "alice", "a/b", "deep.txt", b"x").await;
    upload_file(&app.server, &code, "alice", "", "top.txt", b"x").await;

    let response = app.server.get(&format!("/api/groups/{}/tree", code)).await;
    response.assert_status_ok();
    let tree = &response.json::<Value>()["tree"];

    assert_eq!(tree["files"].as_array().unwrap().len(), 1);
    assert_eq!(tree["files"][0]["originalname"], "top.txt");

    let a = &tree["folders"][0];
    assert_eq!(a["name"], "a");
    assert_eq!(a["files"], json!([]));

    let b = &a["folders"][0];
    assert_eq!(b["path"], "a/b");
    assert_eq!(b["files"][0]["originalname"], "deep.txt");
}

#[tokio::test]
async fn test_tree_shows_empty_folders() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    app.server
        .post(&format!("/api/groups/{}/folders/create", code))
        .json(&json!({ "parentFolder": "", "folderName": "empty" }))
        .await
        .assert_status_ok();

    let tree: Value = app
        .server
        .get(&format!("/api/groups/{}/tree", code))
        .await
        .json();
    assert_eq!(tree["tree"]["folders"][0]["name"], "empty");
    assert_eq!(tree["tree"]["folders"][0]["files"], json!([]));
}

#[tokio::test]
async fn test_rename_folder_is_prefix_safe() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;
    let in_docs = upload_file(&app.server, &code, "alice", "docs", "a.txt", b"a").await;
    let in_docs2 = upload_file(&app.server, &code, "alice", "docs2", "b.txt", b"b").await;
    let nested = upload_file(&app.server, &code, "alice", "docs/sub", "c.txt", b"c").await;

    let response = app
        .server
        .post(&format!("/api/groups/{}/folders/rename", code))
        .json(&json!({ "fromFolder": "docs", "toFolder": "archive" }))
        .await;
    response.assert_status_ok();

    let files = list_files(&app.server, &code).await;
    let folder_of = |file: &Value| {
        files
            .iter()
            .find(|f| f["filename"] == file["filename"])
            .map(|f| f["folder"].clone())
            .unwrap()
    };
    assert_eq!(folder_of(&in_docs), "archive");
    assert_eq!(folder_of(&in_docs2), "docs2");
    assert_eq!(folder_of(&nested), "archive/sub");

    let download = app
        .server
        .get(&format!("/api/groups/{}/files/{}", code, filename_of(&nested)))
        .await;
    download.assert_status_ok();
    assert_eq!(download.as_bytes().as_ref(), b"c");
}

#[tokio::test]
async fn test_rename_missing_folder() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    app.server
        .post(&format!("/api/groups/{}/folders/rename", code))
        .json(&json!({ "fromFolder": "nothing", "toFolder": "else" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_cascades() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;
    upload_file(&app.server, &code, "alice", "a", "one.txt", b"1").await;
    upload_file(&app.server, &code, "alice", "a/b", "two.txt", b"2").await;
    upload_file(&app.server, &code, "alice", "ab", "three.txt", b"3").await;

    let response = app
        .server
        .post(&format!("/api/groups/{}/folders/delete", code))
        .json(&json!({ "folder": "a" }))
        .await;
    response.assert_status_ok();

    let files = list_files(&app.server, &code).await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["folder"], "ab");
    assert!(!app.dir.path().join(&code).join("a").exists());
}

#[tokio::test]
async fn test_delete_missing_folder() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    app.server
        .post(&format!("/api/groups/{}/folders/delete", code))
        .json(&json!({ "folder": "nothing" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_keep_order() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;
    let file = upload_file(&app.server, &code, "alice", "", "notes.txt", b"x").await;
    let url = format!("/api/groups/{}/files/{}/comments", code, filename_of(&file));

    for (author, text) in [("bob", "first"), ("alice", "second"), ("bob", "third")] {
        let response = app
            .server
            .post(&url)
            .json(&json!({ "username": author, "text": text }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["success"], true);
    }

    let response = app.server.get(&url).await;
    response.assert_status_ok();
    let comments = response.json::<Value>()["comments"]
        .as_array()
        .unwrap()
        .clone();

    let texts: Vec<&str> = comments.iter().map(|c| c["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(comments[1]["author"], "alice");
    assert!(comments[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_comments_empty_thread() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    let response = app
        .server
        .get(&format!("/api/groups/{}/files/1-none.txt/comments", code))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["comments"], json!([]));
}

#[tokio::test]
async fn test_comment_requires_text() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;

    let response = app
        .server
        .post(&format!("/api/groups/{}/files/1-a.txt/comments", code))
        .json(&json!({ "username": "bob", "text": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "text is required");
}

#[tokio::test]
async fn test_comments_unknown_group() {
    let app = create_test_app();

    app.server
        .get("/api/groups/ZZZZZZ/files/1-a.txt/comments")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .post("/api/groups/ZZZZZZ/files/1-a.txt/comments")
        .json(&json!({ "username": "bob", "text": "hi" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_follow_renamed_file() {
    let app = create_test_app();
    let code = create_group(&app.server, "Team", "alice").await;
    let file = upload_file(&app.server, &code, "alice", "", "draft.txt", b"x").await;
    let old_name = filename_of(&file);

    app.server
        .post(&format!("/api/groups/{}/files/{}/comments", code, old_name))
        .json(&json!({ "username": "bob", "text": "typo on line 2" }))
        .await
        .assert_status_ok();

    let renamed: Value = app
        .server
        .post(&format!("/api/groups/{}/files/rename", code))
        .json(&json!({ "filename": old_name, "newName": "final.txt" }))
        .await
        .json();
    let new_name = filename_of(&renamed["file"]);

    let moved: Value = app
        .server
        .get(&format!("/api/groups/{}/files/{}/comments", code, new_name))
        .await
        .json();
    assert_eq!(moved["comments"][0]["text"], "typo on line 2");

    let old: Value = app
        .server
        .get(&format!("/api/groups/{}/files/{}/comments", code, old_name))
        .await
        .json();
    assert_eq!(old["comments"], json!([]));
}
