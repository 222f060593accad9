//! File management module for groupdrive.
//!
//! This module provides the shared-file side of a group:
//! - Physical storage under `<uploads>/<code>/<folder>/<diskname>`
//! - The per-group metadata list and the folder operations on it
//! - A folder tree derived from the flat list
//! - Comment threads per file

mod comment;
mod library;
mod metadata;
mod storage;
mod tree;

pub use comment::{Comment, CommentThreads};
pub use library::{Download, FileLibrary, UploadRequest};
pub use metadata::{disk_name_from_millis, FileMetadata};
pub use storage::FileStorage;
pub use tree::{build_tree, FolderNode};

/// Default maximum upload size (50MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
