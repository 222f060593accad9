//! Response DTOs for the groupdrive API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::datetime::to_rfc3339;
use crate::file::{Comment, FileMetadata, FolderNode};
use crate::group::Group;

/// Group as seen by clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupInfo {
    /// Six-character group code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Members in join order; the first one is the admin.
    pub members: Vec<String>,
}

impl From<Group> for GroupInfo {
    fn from(group: Group) -> Self {
        Self {
            code: group.code,
            name: group.name,
            members: group.members,
        }
    }
}

/// File record as seen by clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Disk name; identifies the file in later requests.
    pub filename: String,
    /// Display name given at upload or rename.
    #[serde(rename = "originalname")]
    pub original_name: String,
    /// Uploading user.
    pub uploader: String,
    /// Upload time (RFC 3339).
    pub upload_date: String,
    /// Size in bytes.
    pub size: u64,
    /// Folder path; empty for the group root.
    pub folder: String,
}

impl From<FileMetadata> for FileInfo {
    fn from(meta: FileMetadata) -> Self {
        Self {
            upload_date: to_rfc3339(&meta.upload_date),
            filename: meta.filename,
            original_name: meta.original_name,
            uploader: meta.uploader,
            size: meta.size,
            folder: meta.folder,
        }
    }
}

/// Comment as seen by clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentInfo {
    /// Author username.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// When the comment was added (RFC 3339).
    pub timestamp: String,
}

impl From<Comment> for CommentInfo {
    fn from(comment: Comment) -> Self {
        Self {
            timestamp: to_rfc3339(&comment.timestamp),
            author: comment.author,
            text: comment.text,
        }
    }
}

/// Node of the folder tree.
#[derive(Debug, Serialize, ToSchema)]
pub struct FolderNodeInfo {
    /// Last path segment; empty for the root.
    pub name: String,
    /// Full folder path; empty for the root.
    pub path: String,
    /// Child folders.
    pub folders: Vec<FolderNodeInfo>,
    /// Files directly in this folder.
    pub files: Vec<FileInfo>,
}

impl From<FolderNode> for FolderNodeInfo {
    fn from(node: FolderNode) -> Self {
        Self {
            name: node.name,
            path: node.path,
            folders: node.folders.into_iter().map(Into::into).collect(),
            files: node.files.into_iter().map(Into::into).collect(),
        }
    }
}

/// Plain success acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
}

impl SuccessResponse {
    /// Successful outcome.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response to group creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateGroupResponse {
    /// Code of the new group.
    pub code: String,
    /// The new group.
    pub group: GroupInfo,
}

/// Response carrying one group.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponse {
    /// The group.
    pub group: GroupInfo,
}

/// Response carrying a user's groups.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupListResponse {
    /// Groups in join order.
    pub groups: Vec<GroupInfo>,
}

/// Response to an upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always true.
    pub success: bool,
    /// First stored file.
    pub file: FileInfo,
    /// Every stored file, in request order.
    pub files: Vec<FileInfo>,
}

/// Response carrying one file record.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    /// Always true.
    pub success: bool,
    /// The updated file record.
    pub file: FileInfo,
}

/// Response carrying a group's files.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    /// Files in upload order.
    pub files: Vec<FileInfo>,
}

/// Response carrying the folder tree.
#[derive(Debug, Serialize, ToSchema)]
pub struct TreeResponse {
    /// Root of the tree.
    pub tree: FolderNodeInfo,
}

/// Response carrying every folder path.
#[derive(Debug, Serialize, ToSchema)]
pub struct FolderListResponse {
    /// Folder paths, sorted.
    pub folders: Vec<String>,
}

/// Response carrying a comment thread.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListResponse {
    /// Comments in the order they were added.
    pub comments: Vec<CommentInfo>,
}
