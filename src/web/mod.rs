//! HTTP API for groupdrive.
//!
//! JSON endpoints under `/api/groups` for groups, files, folders and
//! comments, plus a health check, the OpenAPI document and, optionally, the
//! static browser UI.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use router::create_router;
pub use server::WebServer;
