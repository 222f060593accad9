//! Request DTOs for the groupdrive API.
//!
//! Every field defaults to empty so a missing field surfaces as a validation
//! error on that field rather than a JSON decoding failure.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Create group request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGroupRequest {
    /// Display name of the new group.
    #[validate(length(min = 1, max = 100, message = "groupName is required"))]
    pub group_name: String,
    /// Creator, who becomes the group admin.
    #[validate(length(min = 1, max = 64, message = "username is required"))]
    pub username: String,
}

/// Join or leave a group.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct MembershipRequest {
    /// Group code.
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    /// Joining or leaving user.
    #[validate(length(min = 1, max = 64, message = "username is required"))]
    pub username: String,
}

/// Kick member request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct KickMemberRequest {
    /// Group code.
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    /// Member to remove.
    #[validate(length(min = 1, message = "member is required"))]
    pub member: String,
    /// User asking for the removal; must be the group admin.
    #[validate(length(min = 1, message = "requester is required"))]
    pub requester: String,
}

/// Query for listing a user's groups.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ListGroupsQuery {
    /// User whose groups are listed.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

/// Rename file request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameFileRequest {
    /// Current disk name.
    #[validate(length(min = 1, message = "filename is required"))]
    pub filename: String,
    /// New display name.
    #[validate(length(min = 1, max = 255, message = "newName is required"))]
    pub new_name: String,
}

/// Move file request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MoveFileRequest {
    /// Disk name of the file to move.
    #[validate(length(min = 1, message = "filename is required"))]
    pub filename: String,
    /// Destination folder; empty moves the file to the group root.
    pub to_folder: String,
}

/// Create folder request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateFolderRequest {
    /// Folder the new one is created in; empty for the group root.
    pub parent_folder: String,
    /// Name of the new folder.
    #[validate(length(min = 1, max = 255, message = "folderName is required"))]
    pub folder_name: String,
}

/// Rename folder request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameFolderRequest {
    /// Current folder path.
    #[validate(length(min = 1, message = "fromFolder is required"))]
    pub from_folder: String,
    /// New folder path.
    #[validate(length(min = 1, message = "toFolder is required"))]
    pub to_folder: String,
}

/// Delete folder request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct DeleteFolderRequest {
    /// Folder path to delete with everything below it.
    #[validate(length(min = 1, message = "folder is required"))]
    pub folder: String,
}

/// Add comment request.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct AddCommentRequest {
    /// Comment author.
    #[validate(length(min = 1, max = 64, message = "username is required"))]
    pub username: String,
    /// Comment body.
    #[validate(length(min = 1, max = 2000, message = "text is required"))]
    pub text: String,
}
