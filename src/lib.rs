//! groupdrive - group file sharing server
//!
//! Users create or join groups by a six-character code and share a folder
//! tree of uploaded files, with a comment thread on every file. Group state
//! lives in memory; file bytes live under `<uploads>/<code>/<folder>/`.

pub mod config;
pub mod datetime;
pub mod error;
pub mod file;
pub mod group;
pub mod logging;
pub mod path;
pub mod store;
pub mod web;

pub use config::Config;
pub use error::{DriveError, Result};
pub use file::{Comment, FileMetadata, FileStorage, FolderNode, UploadRequest};
pub use group::{CodeGenerator, Group, RandomCodeGenerator};
pub use store::GroupStore;
pub use web::WebServer;
