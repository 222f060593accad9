//! Folder handlers for the API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    CreateFolderRequest, DeleteFolderRequest, FolderListResponse, RenameFolderRequest,
    SuccessResponse, TreeResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/groups/:code/folders/create - Create a folder.
#[utoipa::path(
    post,
    path = "/api/groups/{code}/folders/create",
    tag = "folders",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    request_body = CreateFolderRequest,
    responses(
        (status = 200, description = "Folder created", body = SuccessResponse),
        (status = 400, description = "Invalid folder name"),
        (status = 404, description = "Group not found"),
        (status = 500, description = "Folder could not be created")
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .store
        .create_folder(&code, &req.parent_folder, &req.folder_name)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/groups/:code/folders/rename - Rename or move a folder subtree.
#[utoipa::path(
    post,
    path = "/api/groups/{code}/folders/rename",
    tag = "folders",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    request_body = RenameFolderRequest,
    responses(
        (status = 200, description = "Folder renamed", body = SuccessResponse),
        (status = 400, description = "Invalid target"),
        (status = 404, description = "Group or folder not found")
    )
)]
pub async fn rename_folder(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameFolderRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .store
        .rename_folder(&code, &req.from_folder, &req.to_folder)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/groups/:code/folders/delete - Delete a folder and everything in it.
#[utoipa::path(
    post,
    path = "/api/groups/{code}/folders/delete",
    tag = "folders",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    request_body = DeleteFolderRequest,
    responses(
        (status = 200, description = "Folder deleted", body = SuccessResponse),
        (status = 404, description = "Group or folder not found")
    )
)]
pub async fn delete_folder(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidatedJson(req): ValidatedJson<DeleteFolderRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.store.delete_folder(&code, &req.folder).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/groups/:code/tree - Folder tree with files, including empty folders.
#[utoipa::path(
    get,
    path = "/api/groups/{code}/tree",
    tag = "folders",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    responses(
        (status = 200, description = "Folder tree", body = TreeResponse),
        (status = 404, description = "Group not found")
    )
)]
pub async fn folder_tree(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<TreeResponse>, ApiError> {
    let tree = state.store.folder_tree(&code).await?;
    Ok(Json(TreeResponse { tree: tree.into() }))
}

/// GET /api/groups/:code/folders - Every folder path of a group.
#[utoipa::path(
    get,
    path = "/api/groups/{code}/folders",
    tag = "folders",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    responses(
        (status = 200, description = "Folder paths", body = FolderListResponse),
        (status = 404, description = "Group not found")
    )
)]
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<FolderListResponse>, ApiError> {
    let folders = state.store.list_folders(&code).await?;
    Ok(Json(FolderListResponse { folders }))
}
