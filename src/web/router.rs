//! Router configuration for the groupdrive API.

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    add_comment, create_folder, create_group, delete_file, delete_folder, download_file,
    folder_tree, get_group, join_group, kick_member, leave_group, list_comments, list_files,
    list_folders, list_groups, move_file, rename_file, rename_folder, upload_file, AppState,
};
use super::middleware::create_cors_layer;
use super::openapi::ApiDoc;

/// Room for multipart boundaries and the text fields next to the file bytes.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = usize::try_from(app_state.max_upload_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let group_routes = Router::new()
        .route("/create", post(create_group))
        .route("/join", post(join_group))
        .route("/list", get(list_groups))
        .route("/leave", post(leave_group))
        .route("/kick", post(kick_member))
        .route("/:code", get(get_group));

    let file_routes = Router::new()
        .route(
            "/:code/files",
            get(list_files).post(upload_file.layer(DefaultBodyLimit::max(body_limit))),
        )
        .route("/:code/files/rename", post(rename_file))
        .route("/:code/files/move", post(move_file))
        .route(
            "/:code/files/:filename",
            get(download_file).delete(delete_file),
        )
        .route(
            "/:code/files/:filename/comments",
            get(list_comments).post(add_comment),
        );

    let folder_routes = Router::new()
        .route("/:code/folders", get(list_folders))
        .route("/:code/folders/create", post(create_folder))
        .route("/:code/folders/rename", post(rename_folder))
        .route("/:code/folders/delete", post(delete_folder))
        .route("/:code/tree", get(folder_tree));

    let api_routes = Router::new().nest(
        "/groups",
        group_routes.merge(file_routes).merge(folder_routes),
    );

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Create a router serving the built browser UI.
///
/// Unknown paths fall back to `index.html` so client-side routes work.
/// Returns `None` when the directory does not exist.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let dir = Path::new(static_path);
    if !dir.is_dir() {
        tracing::warn!(
            path = %static_path,
            "Static file directory not found; browser UI will not be served"
        );
        return None;
    }

    let index = dir.join("index.html");
    let serve_dir = ServeDir::new(dir).not_found_service(ServeFile::new(index));
    Some(Router::new().fallback_service(serve_dir))
}
