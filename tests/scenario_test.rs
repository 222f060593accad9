//! End-to-end scenario over the HTTP API with a fixed group code.

mod common;

use common::{create_test_app_with_code, filename_of, join_group, list_files, upload_file};
use serde_json::{json, Value};

#[tokio::test]
async fn test_team_scenario() {
    let app = create_test_app_with_code("ABC123");
    let server = &app.server;

    // alice creates the group
    let created: Value = server
        .post("/api/groups/create")
        .json(&json!({ "groupName": "Team", "username": "alice" }))
        .await
        .json();
    assert_eq!(created["code"], "ABC123");
    let code = "ABC123";

    // bob joins
    let joined = join_group(server, code, "bob").await;
    assert_eq!(joined["group"]["members"], json!(["alice", "bob"]));

    // alice uploads to the root
    let file = upload_file(server, code, "alice", "", "notes.txt", b"meeting notes").await;
    let files = list_files(server, code).await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["originalname"], "notes.txt");
    assert_eq!(files[0]["folder"], "");

    // bob comments
    let comments_url = format!("/api/groups/{}/files/{}/comments", code, filename_of(&file));
    server
        .post(&comments_url)
        .json(&json!({ "username": "bob", "text": "looks good" }))
        .await
        .assert_status_ok();
    let comments: Value = server.get(&comments_url).await.json();
    let thread = comments["comments"].as_array().unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0]["author"], "bob");
    assert_eq!(thread[0]["text"], "looks good");

    // alice kicks bob
    server
        .post("/api/groups/kick")
        .json(&json!({ "code": code, "member": "bob", "requester": "alice" }))
        .await
        .assert_status_ok();

    let group: Value = server.get(&format!("/api/groups/{}", code)).await.json();
    assert_eq!(group["group"]["members"], json!(["alice"]));

    let bobs: Value = server
        .get("/api/groups/list")
        .add_query_param("username", "bob")
        .await
        .json();
    assert!(bobs["groups"]
        .as_array()
        .unwrap()
        .iter()
        .all(|g| g["code"] != code));
}

#[tokio::test]
async fn test_code_collision_is_reported() {
    let app = create_test_app_with_code("ABC123");

    app.server
        .post("/api/groups/create")
        .json(&json!({ "groupName": "First", "username": "alice" }))
        .await
        .assert_status_ok();

    // Every candidate collides, so creation fails instead of overwriting.
    let response = app
        .server
        .post("/api/groups/create")
        .json(&json!({ "groupName": "Second", "username": "bob" }))
        .await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

    let group: Value = app.server.get("/api/groups/ABC123").await.json();
    assert_eq!(group["group"]["name"], "First");
}
