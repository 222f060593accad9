//! File handlers for the API.

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::file::UploadRequest;
use crate::web::dto::{
    FileInfo, FileListResponse, FileResponse, MoveFileRequest, RenameFileRequest,
    SuccessResponse, UploadResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are dropped and quotes/backslashes replaced in the
/// plain `filename` parameter; anything non-ASCII is also sent RFC 5987
/// encoded in `filename*`.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

fn multipart_error(err: MultipartError, max_upload_size: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::payload_too_large(format!(
            "File too large (max {}MB)",
            max_upload_size / 1024 / 1024
        ));
    }
    tracing::warn!("Failed to read multipart data: {}", err);
    ApiError::bad_request("Invalid multipart data")
}

/// POST /api/groups/:code/files - Upload one or more files.
///
/// Request body: multipart/form-data with one or more "file" parts plus
/// "username" and an optional "folder".
#[utoipa::path(
    post,
    path = "/api/groups/{code}/files",
    tag = "files",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    responses(
        (status = 200, description = "Files uploaded", body = UploadResponse),
        (status = 400, description = "No file or missing username"),
        (status = 404, description = "Group not found"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    state.store.get_group(&code).await?;

    let mut username = String::new();
    let mut folder = String::new();
    let mut parts: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, state.max_upload_size))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, state.max_upload_size))?;
                if content.len() as u64 > state.max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "File too large (max {}MB)",
                        state.max_upload_size / 1024 / 1024
                    )));
                }
                parts.push((filename, content.to_vec()));
            }
            "username" => {
                username = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, state.max_upload_size))?;
            }
            "folder" => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, state.max_upload_size))?;
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        return Err(ApiError::bad_request("No file uploaded"));
    }

    let mut stored = Vec::with_capacity(parts.len());
    for (filename, content) in parts {
        let request = UploadRequest::new(&username, filename, content).with_folder(&folder);
        let meta = state.store.upload(&code, &request).await?;
        stored.push(FileInfo::from(meta));
    }

    let file = stored
        .first()
        .cloned()
        .ok_or_else(|| ApiError::internal("No file stored"))?;

    Ok(Json(UploadResponse {
        success: true,
        file,
        files: stored,
    }))
}

/// GET /api/groups/:code/files - List a group's files in upload order.
#[utoipa::path(
    get,
    path = "/api/groups/{code}/files",
    tag = "files",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    responses(
        (status = 200, description = "Files of the group", body = FileListResponse),
        (status = 404, description = "Group not found")
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.store.list_files(&code).await?;
    Ok(Json(FileListResponse {
        files: files.into_iter().map(FileInfo::from).collect(),
    }))
}

/// GET /api/groups/:code/files/:filename - Download a file.
#[utoipa::path(
    get,
    path = "/api/groups/{code}/files/{filename}",
    tag = "files",
    params(
        ("code" = String, Path, description = "Group code"),
        ("filename" = String, Path, description = "Disk name of the file")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "Group or file not found")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path((code, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let download = state.store.download(&code, &filename).await?;

    let content_type = mime_guess::from_path(&download.display_name)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&download.display_name),
        )
        .header(header::CONTENT_LENGTH, download.content.len())
        .body(Body::from(download.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// DELETE /api/groups/:code/files/:filename - Delete a file.
#[utoipa::path(
    delete,
    path = "/api/groups/{code}/files/{filename}",
    tag = "files",
    params(
        ("code" = String, Path, description = "Group code"),
        ("filename" = String, Path, description = "Disk name of the file")
    ),
    responses(
        (status = 200, description = "File deleted", body = SuccessResponse),
        (status = 404, description = "Group or file not found")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path((code, filename)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.store.delete_file(&code, &filename).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/groups/:code/files/rename - Rename a file.
#[utoipa::path(
    post,
    path = "/api/groups/{code}/files/rename",
    tag = "files",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    request_body = RenameFileRequest,
    responses(
        (status = 200, description = "File renamed", body = FileResponse),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "Group or file not found")
    )
)]
pub async fn rename_file(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameFileRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let meta = state
        .store
        .rename_file(&code, &req.filename, &req.new_name)
        .await?;
    Ok(Json(FileResponse {
        success: true,
        file: meta.into(),
    }))
}

/// POST /api/groups/:code/files/move - Move a file to another folder.
#[utoipa::path(
    post,
    path = "/api/groups/{code}/files/move",
    tag = "files",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    request_body = MoveFileRequest,
    responses(
        (status = 200, description = "File moved", body = SuccessResponse),
        (status = 404, description = "Group or file not found")
    )
)]
pub async fn move_file(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ValidatedJson(req): ValidatedJson<MoveFileRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .store
        .move_file(&code, &req.filename, &req.to_folder)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
