//! Comment handlers for the API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    AddCommentRequest, CommentInfo, CommentListResponse, SuccessResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/groups/:code/files/:filename/comments - Comment on a file.
#[utoipa::path(
    post,
    path = "/api/groups/{code}/files/{filename}/comments",
    tag = "comments",
    params(
        ("code" = String, Path, description = "Group code"),
        ("filename" = String, Path, description = "Disk name of the file")
    ),
    request_body = AddCommentRequest,
    responses(
        (status = 200, description = "Comment added", body = SuccessResponse),
        (status = 400, description = "Missing author or text"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path((code, filename)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<AddCommentRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .store
        .add_comment(&code, &filename, &req.username, &req.text)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/groups/:code/files/:filename/comments - Comments in the order they were added.
#[utoipa::path(
    get,
    path = "/api/groups/{code}/files/{filename}/comments",
    tag = "comments",
    params(
        ("code" = String, Path, description = "Group code"),
        ("filename" = String, Path, description = "Disk name of the file")
    ),
    responses(
        (status = 200, description = "Comment thread", body = CommentListResponse),
        (status = 404, description = "Group not found")
    )
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path((code, filename)): Path<(String, String)>,
) -> Result<Json<CommentListResponse>, ApiError> {
    let comments = state.store.list_comments(&code, &filename).await?;
    Ok(Json(CommentListResponse {
        comments: comments.into_iter().map(CommentInfo::from).collect(),
    }))
}
