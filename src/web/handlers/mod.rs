//! API handlers for the groupdrive HTTP API.

pub mod comment;
pub mod file;
pub mod folder;
pub mod group;

pub use comment::*;
pub use file::*;
pub use folder::*;
pub use group::*;

use std::sync::Arc;

use crate::file::DEFAULT_MAX_FILE_SIZE;
use crate::store::GroupStore;

/// Application state shared across handlers.
pub struct AppState {
    /// Groups, files and comments.
    pub store: Arc<GroupStore>,
    /// Maximum size of a single uploaded file in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: Arc<GroupStore>) -> Self {
        Self {
            store,
            max_upload_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set the maximum upload size.
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }
}
