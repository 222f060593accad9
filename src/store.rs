//! Shared state of a running groupdrive server.
//!
//! [`GroupStore`] is built once at startup and handed to the request
//! handlers. Group membership sits behind one `RwLock`; each group's files
//! and comment threads sit behind their own `Mutex`, so a compound mutation
//! (disk operation plus metadata update) never interleaves with another
//! request on the same group while different groups proceed in parallel.
//!
//! Lock order is registry, then the space map, then a group's mutex. A
//! group mutex is never held while taking the registry lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::file::{
    Comment, CommentThreads, Download, FileLibrary, FileMetadata, FileStorage, FolderNode,
    UploadRequest,
};
use crate::group::{CodeGenerator, Departure, Group, GroupRegistry, RandomCodeGenerator};
use crate::{DriveError, Result};

/// Files and comment threads of one group.
#[derive(Debug)]
struct GroupSpace {
    library: FileLibrary,
    comments: CommentThreads,
}

impl GroupSpace {
    fn new(code: &str) -> Self {
        Self {
            library: FileLibrary::new(code),
            comments: CommentThreads::new(),
        }
    }
}

/// Process-wide store of groups, files and comments.
pub struct GroupStore {
    registry: RwLock<GroupRegistry>,
    spaces: RwLock<HashMap<String, Arc<Mutex<GroupSpace>>>>,
    storage: FileStorage,
    codes: Box<dyn CodeGenerator>,
}

impl GroupStore {
    /// Create an empty store writing files to `storage`.
    pub fn new(storage: FileStorage) -> Self {
        Self {
            registry: RwLock::new(GroupRegistry::new()),
            spaces: RwLock::new(HashMap::new()),
            storage,
            codes: Box::new(RandomCodeGenerator),
        }
    }

    /// Use a different source of group codes.
    pub fn with_code_generator(mut self, codes: impl CodeGenerator + 'static) -> Self {
        self.codes = Box::new(codes);
        self
    }

    /// Set how many code candidates are tried when creating a group.
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        let registry = std::mem::take(self.registry.get_mut());
        *self.registry.get_mut() = registry.with_max_code_attempts(attempts);
        self
    }

    /// The underlying file storage.
    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    async fn space(&self, code: &str) -> Result<Arc<Mutex<GroupSpace>>> {
        let registry = self.registry.read().await;
        if !registry.contains(code) {
            return Err(DriveError::group_not_found());
        }

        if let Some(space) = self.spaces.read().await.get(code) {
            return Ok(Arc::clone(space));
        }

        let mut spaces = self.spaces.write().await;
        let space = spaces
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(GroupSpace::new(code))));
        Ok(Arc::clone(space))
    }

    async fn forget_space(&self, code: &str) {
        if self.spaces.write().await.remove(code).is_some() {
            tracing::warn!(
                code = %code,
                "Group emptied; its uploaded files stay on disk without an owning group"
            );
        }
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Create a group with `creator` as admin.
    ///
    /// A code whose directory is still on disk from an emptied group counts
    /// as taken.
    pub async fn create_group(&self, name: &str, creator: &str) -> Result<Group> {
        let mut registry = self.registry.write().await;
        let group = registry.create_group_where(name, creator, self.codes.as_ref(), |code| {
            !self.storage.group_dir(code).exists()
        })?;
        self.spaces.write().await.insert(
            group.code.clone(),
            Arc::new(Mutex::new(GroupSpace::new(&group.code))),
        );
        drop(registry);

        tracing::info!(code = %group.code, creator = %creator, "Group created");
        Ok(group)
    }

    /// Look up a group.
    pub async fn get_group(&self, code: &str) -> Result<Group> {
        self.registry
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(DriveError::group_not_found)
    }

    /// Join a group (idempotent).
    pub async fn join_group(&self, code: &str, username: &str) -> Result<Group> {
        let group = self.registry.write().await.join_group(code, username)?;
        tracing::info!(code = %code, username = %username, "Member joined");
        Ok(group)
    }

    /// Leave a group; the last member leaving destroys it.
    pub async fn leave_group(&self, code: &str, username: &str) -> Result<()> {
        let mut registry = self.registry.write().await;
        let departure = registry.leave_group(code, username)?;
        tracing::info!(code = %code, username = %username, "Member left");

        if departure == Departure::GroupDestroyed {
            self.forget_space(code).await;
        }
        Ok(())
    }

    /// Kick `member` out of a group on behalf of `requester`.
    pub async fn kick_member(&self, code: &str, member: &str, requester: &str) -> Result<()> {
        let result = self
            .registry
            .write()
            .await
            .kick_member(code, member, requester);

        match result {
            Ok(_) => {
                tracing::info!(code = %code, member = %member, requester = %requester, "Member kicked");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(code = %code, member = %member, requester = %requester, error = %e, "Kick refused");
                Err(e)
            }
        }
    }

    /// Groups a user belongs to, in join order.
    pub async fn groups_for_user(&self, username: &str) -> Result<Vec<Group>> {
        if username.trim().is_empty() {
            return Err(DriveError::Validation("username is required".to_string()));
        }
        Ok(self.registry.read().await.groups_for_user(username))
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Upload a file into a group.
    pub async fn upload(&self, code: &str, request: &UploadRequest) -> Result<FileMetadata> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        space.library.upload(&self.storage, request)
    }

    /// All file records of a group in upload order.
    pub async fn list_files(&self, code: &str) -> Result<Vec<FileMetadata>> {
        let space = self.space(code).await?;
        let space = space.lock().await;
        Ok(space.library.files().to_vec())
    }

    /// Read a file.
    pub async fn download(&self, code: &str, filename: &str) -> Result<Download> {
        let space = self.space(code).await?;
        let space = space.lock().await;
        space.library.download(&self.storage, filename)
    }

    /// Delete a file.
    pub async fn delete_file(&self, code: &str, filename: &str) -> Result<()> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        space.library.delete(&self.storage, filename)
    }

    /// Rename a file. Its comment thread follows it to the new disk name.
    pub async fn rename_file(&self, code: &str, filename: &str, new_name: &str) -> Result<FileMetadata> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        let renamed = space.library.rename(&self.storage, filename, new_name)?;
        space.comments.rekey(filename, &renamed.filename);
        Ok(renamed)
    }

    /// Move a file to another folder.
    pub async fn move_file(&self, code: &str, filename: &str, to_folder: &str) -> Result<FileMetadata> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        space.library.move_file(&self.storage, filename, to_folder)
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    /// Create a folder; returns its sanitized path.
    pub async fn create_folder(&self, code: &str, parent: &str, name: &str) -> Result<String> {
        let space = self.space(code).await?;
        let space = space.lock().await;
        space.library.create_folder(&self.storage, parent, name)
    }

    /// Rename a folder and every file path below it.
    pub async fn rename_folder(&self, code: &str, from: &str, to: &str) -> Result<usize> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        space.library.rename_folder(&self.storage, from, to)
    }

    /// Delete a folder subtree with its files.
    pub async fn delete_folder(&self, code: &str, folder: &str) -> Result<usize> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        space.library.delete_folder(&self.storage, folder)
    }

    /// Folder tree of a group.
    pub async fn folder_tree(&self, code: &str) -> Result<FolderNode> {
        let space = self.space(code).await?;
        let space = space.lock().await;
        space.library.tree(&self.storage)
    }

    /// Every folder directory of a group.
    pub async fn list_folders(&self, code: &str) -> Result<Vec<String>> {
        let space = self.space(code).await?;
        let _space = space.lock().await;
        self.storage.list_folders(code)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Append a comment to a file's thread.
    pub async fn add_comment(&self, code: &str, filename: &str, author: &str, text: &str) -> Result<Comment> {
        let space = self.space(code).await?;
        let mut space = space.lock().await;
        let comment = space.comments.add(filename, author, text)?;
        tracing::debug!(code = %code, filename = %filename, author = %author, "Comment added");
        Ok(comment)
    }

    /// Comments on a file in insertion order.
    pub async fn list_comments(&self, code: &str, filename: &str) -> Result<Vec<Comment>> {
        let space = self.space(code).await?;
        let space = space.lock().await;
        Ok(space.comments.list(filename))
    }
}
