//! Per-group file library.
//!
//! A [`FileLibrary`] owns the metadata list of one group and performs every
//! mutation on both the list and the disk. Each operation either completes
//! both sides or returns an error; nothing is rolled back if the disk step
//! fails halfway.

use chrono::Utc;

use crate::datetime::epoch_millis;
use crate::path;
use crate::{DriveError, Result};

use super::metadata::{disk_name_from_millis, FileMetadata};
use super::storage::FileStorage;
use super::tree::{build_tree, FolderNode};

/// Request data for file upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Folder to upload into (raw, sanitized on upload).
    pub folder: String,
    /// Username of the uploader.
    pub uploader: String,
    /// Display name supplied by the client.
    pub original_name: String,
    /// File content.
    pub content: Vec<u8>,
}

impl UploadRequest {
    /// Create a new upload request into the group root.
    pub fn new(
        uploader: impl Into<String>,
        original_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            folder: String::new(),
            uploader: uploader.into(),
            original_name: original_name.into(),
            content,
        }
    }

    /// Set the target folder.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }
}

/// Result of a file download.
#[derive(Debug)]
pub struct Download {
    /// File metadata, if the registry knows the file.
    pub metadata: Option<FileMetadata>,
    /// Name to present to the client.
    pub display_name: String,
    /// File content.
    pub content: Vec<u8>,
}

/// Files of one group.
#[derive(Debug)]
pub struct FileLibrary {
    code: String,
    files: Vec<FileMetadata>,
}

impl FileLibrary {
    /// Create an empty library for a group.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            files: Vec::new(),
        }
    }

    /// Code of the owning group.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// All records in upload order.
    pub fn files(&self) -> &[FileMetadata] {
        &self.files
    }

    /// Look up a record by disk name.
    pub fn find(&self, filename: &str) -> Option<&FileMetadata> {
        self.files.iter().find(|f| f.filename == filename)
    }

    fn position(&self, filename: &str) -> Option<usize> {
        self.files.iter().position(|f| f.filename == filename)
    }

    /// Folder a file lives in; unknown files resolve to the group root.
    fn resolve_folder(&self, filename: &str) -> String {
        self.find(filename)
            .map(|f| f.folder.clone())
            .unwrap_or_default()
    }

    /// Pick a disk name for `original_name` in `folder` that nothing uses yet.
    fn fresh_disk_name(&self, storage: &FileStorage, folder: &str, original_name: &str) -> String {
        let mut millis = epoch_millis(&Utc::now());
        loop {
            let candidate = disk_name_from_millis(millis, original_name);
            let taken = self.find(&candidate).is_some()
                || storage.exists(&self.code, folder, &candidate);
            if !taken {
                return candidate;
            }
            millis += 1;
        }
    }

    /// Store an uploaded file and record it.
    pub fn upload(&mut self, storage: &FileStorage, request: &UploadRequest) -> Result<FileMetadata> {
        let uploader = request.uploader.trim();
        if uploader.is_empty() {
            return Err(DriveError::Validation("username is required".to_string()));
        }
        let original_name = path::display_name(&request.original_name)
            .ok_or_else(|| DriveError::Validation("invalid file name".to_string()))?;
        let folder = path::sanitize(&request.folder);

        let filename = self.fresh_disk_name(storage, &folder, &original_name);
        storage.save(&self.code, &folder, &filename, &request.content)?;

        let meta = FileMetadata::new(
            filename,
            original_name,
            uploader,
            request.content.len() as u64,
            folder,
        );
        self.files.push(meta.clone());

        tracing::info!(
            code = %self.code,
            filename = %meta.filename,
            folder = %meta.folder,
            size = meta.size,
            "File uploaded"
        );
        Ok(meta)
    }

    /// Read a file's content.
    pub fn download(&self, storage: &FileStorage, filename: &str) -> Result<Download> {
        if !path::is_safe_file_name(filename) {
            return Err(DriveError::file_not_found());
        }
        let metadata = self.find(filename).cloned();
        let folder = metadata
            .as_ref()
            .map(|m| m.folder.clone())
            .unwrap_or_default();
        let content = storage.load(&self.code, &folder, filename)?;
        let display_name = metadata
            .as_ref()
            .map(|m| m.original_name.clone())
            .unwrap_or_else(|| filename.to_string());

        Ok(Download {
            metadata,
            display_name,
            content,
        })
    }

    /// Delete a file from disk and from the list.
    pub fn delete(&mut self, storage: &FileStorage, filename: &str) -> Result<()> {
        if !path::is_safe_file_name(filename) {
            return Err(DriveError::file_not_found());
        }
        let folder = self.resolve_folder(filename);
        if !storage.exists(&self.code, &folder, filename) {
            return Err(DriveError::file_not_found());
        }

        storage.delete(&self.code, &folder, filename)?;
        self.files.retain(|f| f.filename != filename);

        tracing::info!(code = %self.code, filename = %filename, "File deleted");
        Ok(())
    }

    /// Give a file a new display name and, with it, a new disk name.
    ///
    /// The old disk name stops resolving immediately.
    pub fn rename(
        &mut self,
        storage: &FileStorage,
        filename: &str,
        new_name: &str,
    ) -> Result<FileMetadata> {
        let new_name = path::display_name(new_name)
            .ok_or_else(|| DriveError::Validation("invalid file name".to_string()))?;
        let idx = self.position(filename).ok_or_else(DriveError::file_not_found)?;
        let folder = self.files[idx].folder.clone();

        let new_filename = self.fresh_disk_name(storage, &folder, &new_name);
        storage.rename_file(&self.code, &folder, filename, &folder, &new_filename)?;

        let meta = &mut self.files[idx];
        meta.filename = new_filename;
        meta.original_name = new_name;

        tracing::info!(
            code = %self.code,
            from = %filename,
            to = %meta.filename,
            "File renamed"
        );
        Ok(meta.clone())
    }

    /// Move a file to another folder, keeping its disk name.
    pub fn move_file(
        &mut self,
        storage: &FileStorage,
        filename: &str,
        to_folder: &str,
    ) -> Result<FileMetadata> {
        let idx = self.position(filename).ok_or_else(DriveError::file_not_found)?;
        let to_folder = path::sanitize(to_folder);
        let from_folder = self.files[idx].folder.clone();

        if !storage.exists(&self.code, &from_folder, filename) {
            return Err(DriveError::file_not_found());
        }
        if from_folder != to_folder {
            storage.rename_file(&self.code, &from_folder, filename, &to_folder, filename)?;
            self.files[idx].folder = to_folder;
        }

        tracing::info!(
            code = %self.code,
            filename = %filename,
            from = %from_folder,
            to = %self.files[idx].folder,
            "File moved"
        );
        Ok(self.files[idx].clone())
    }

    /// Create a (possibly nested) folder; it need not contain files.
    pub fn create_folder(&self, storage: &FileStorage, parent: &str, name: &str) -> Result<String> {
        let name = path::sanitize(name);
        if name.is_empty() {
            return Err(DriveError::Validation("folderName is required".to_string()));
        }
        let folder = path::join(&path::sanitize(parent), &name);
        storage.ensure_folder(&self.code, &folder)?;

        tracing::info!(code = %self.code, folder = %folder, "Folder created");
        Ok(folder)
    }

    /// Rename a folder and re-home every file at or below it.
    ///
    /// Returns the number of records whose folder changed.
    pub fn rename_folder(&mut self, storage: &FileStorage, from: &str, to: &str) -> Result<usize> {
        let from = path::sanitize(from);
        let to = path::sanitize(to);
        if from.is_empty() {
            return Err(DriveError::Validation("fromFolder is required".to_string()));
        }
        if to.is_empty() {
            return Err(DriveError::Validation("toFolder is required".to_string()));
        }
        if !storage.folder_exists(&self.code, &from) {
            return Err(DriveError::folder_not_found());
        }
        if from == to {
            return Ok(0);
        }
        if path::is_within(&to, &from) {
            return Err(DriveError::Validation(
                "cannot move a folder into itself".to_string(),
            ));
        }
        if storage.folder_exists(&self.code, &to) {
            return Err(DriveError::Validation(format!("folder {to} already exists")));
        }

        storage.rename_folder(&self.code, &from, &to)?;

        let mut changed = 0;
        for file in &mut self.files {
            if let Some(folder) = path::replace_prefix(&file.folder, &from, &to) {
                file.folder = folder;
                changed += 1;
            }
        }

        tracing::info!(
            code = %self.code,
            from = %from,
            to = %to,
            files = changed,
            "Folder renamed"
        );
        Ok(changed)
    }

    /// Remove a folder subtree and every record inside it.
    ///
    /// Returns the number of records removed.
    pub fn delete_folder(&mut self, storage: &FileStorage, folder: &str) -> Result<usize> {
        let folder = path::sanitize(folder);
        if folder.is_empty() {
            return Err(DriveError::Validation("folder is required".to_string()));
        }

        storage.remove_folder(&self.code, &folder)?;

        let before = self.files.len();
        self.files.retain(|f| !path::is_within(&f.folder, &folder));
        let removed = before - self.files.len();

        tracing::info!(
            code = %self.code,
            folder = %folder,
            files = removed,
            "Folder deleted"
        );
        Ok(removed)
    }

    /// Folder tree of the files, including folders that hold no files.
    pub fn tree(&self, storage: &FileStorage) -> Result<FolderNode> {
        let folders = storage.list_folders(&self.code)?;
        Ok(build_tree(&self.files).with_folders(folders))
    }
}
