//! File metadata records for groupdrive file management.

use chrono::{DateTime, Utc};
use serde::Serialize;


/// Registry record describing one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    /// Disk name, unique within the group (`<millis>-<originalname>`).
    pub filename: String,
    /// Display name supplied by the uploader.
    #[serde(rename = "originalname")]
    pub original_name: String,
    /// Username of the uploader.
    pub uploader: String,
    /// When the file was uploaded.
    #[serde(rename = "uploadDate")]
    pub upload_date: DateTime<Utc>,
    /// File size in bytes.
    pub size: u64,
    /// Folder path the file lives in ("" for the group root).
    pub folder: String,
}

impl FileMetadata {
    /// Create a new record.
    pub fn new(
        filename: impl Into<String>,
        original_name: impl Into<String>,
        uploader: impl Into<String>,
        size: u64,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            original_name: original_name.into(),
            uploader: uploader.into(),
            upload_date: Utc::now(),
            size,
            folder: folder.into(),
        }
    }

    /// Set the upload date.
    pub fn with_upload_date(mut self, upload_date: DateTime<Utc>) -> Self {
        self.upload_date = upload_date;
        self
    }
}

/// Build a disk name from a millisecond prefix and a display name.
pub fn disk_name_from_millis(millis: i64, original_name: &str) -> String {
    format!("{millis}-{original_name}")
}
