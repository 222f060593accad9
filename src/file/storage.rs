//! Physical file storage for groupdrive.
//!
//! Every group owns a directory under the storage root and files sit in the
//! folder path recorded in their metadata:
//! ```text
//! {base_path}/
//! ├── ABC123/
//! │   ├── 1705314600000-notes.txt
//! │   └── docs/
//! │       └── 2024/
//! │           └── 1705314612345-report.pdf
//! └── XYZ789/
//!     └── ...
//! ```
//!
//! Folder arguments must already be sanitized (see [`crate::path::sanitize`]).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{DriveError, Result};

/// File storage service for managing physical files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Root directory of a group.
    pub fn group_dir(&self, code: &str) -> PathBuf {
        self.base_path.join(code)
    }

    /// Directory for a folder inside a group.
    pub fn folder_dir(&self, code: &str, folder: &str) -> PathBuf {
        let mut dir = self.group_dir(code);
        for segment in folder.split('/').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    }

    /// Full path of a stored file.
    pub fn file_path(&self, code: &str, folder: &str, stored_name: &str) -> PathBuf {
        self.folder_dir(code, folder).join(stored_name)
    }

    /// Write content, creating the folder directory on demand.
    pub fn save(&self, code: &str, folder: &str, stored_name: &str, content: &[u8]) -> Result<()> {
        let dir = self.ensure_folder(code, folder)?;
        fs::write(dir.join(stored_name), content)?;
        Ok(())
    }

    /// Read the content of a stored file.
    pub fn load(&self, code: &str, folder: &str, stored_name: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(code, folder, stored_name);
        if !file_path.is_file() {
            return Err(DriveError::file_not_found());
        }

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DriveError::file_not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a regular file exists at this location.
    pub fn exists(&self, code: &str, folder: &str, stored_name: &str) -> bool {
        self.file_path(code, folder, stored_name).is_file()
    }

    /// Whether a folder directory exists.
    pub fn folder_exists(&self, code: &str, folder: &str) -> bool {
        self.folder_dir(code, folder).is_dir()
    }

    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't exist.
    pub fn delete(&self, code: &str, folder: &str, stored_name: &str) -> Result<bool> {
        let file_path = self.file_path(code, folder, stored_name);

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Move a stored file, possibly to another folder and name.
    pub fn rename_file(
        &self,
        code: &str,
        from_folder: &str,
        from_name: &str,
        to_folder: &str,
        to_name: &str,
    ) -> Result<()> {
        let source = self.file_path(code, from_folder, from_name);
        if !source.is_file() {
            return Err(DriveError::file_not_found());
        }
        let target_dir = self.ensure_folder(code, to_folder)?;
        fs::rename(source, target_dir.join(to_name))?;
        Ok(())
    }

    /// Create a folder directory (and its parents) if missing.
    pub fn ensure_folder(&self, code: &str, folder: &str) -> Result<PathBuf> {
        let dir = self.folder_dir(code, folder);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Rename a folder directory with everything below it.
    pub fn rename_folder(&self, code: &str, from: &str, to: &str) -> Result<()> {
        let source = self.folder_dir(code, from);
        if !source.is_dir() {
            return Err(DriveError::folder_not_found());
        }
        let target = self.folder_dir(code, to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(source, target)?;
        Ok(())
    }

    /// Remove a folder directory recursively.
    pub fn remove_folder(&self, code: &str, folder: &str) -> Result<()> {
        let dir = self.folder_dir(code, folder);
        if !dir.is_dir() {
            return Err(DriveError::folder_not_found());
        }
        fs::remove_dir_all(dir)?;
        Ok(())
    }

    /// Every directory below the group root, as sorted folder paths.
    ///
    /// A group without a root directory yet has no folders.
    pub fn list_folders(&self, code: &str) -> Result<Vec<String>> {
        let mut folders = Vec::new();
        let root = self.group_dir(code);
        if root.is_dir() {
            Self::collect_folders(&root, "", &mut folders)?;
        }
        folders.sort();
        Ok(folders)
    }

    fn collect_folders(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let folder = crate::path::join(prefix, &name);
            Self::collect_folders(&entry.path(), &folder, out)?;
            out.push(folder);
        }
        Ok(())
    }
}
