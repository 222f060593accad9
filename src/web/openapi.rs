//! OpenAPI document for the groupdrive API.

use utoipa::OpenApi;

use super::dto::{
    AddCommentRequest, CommentInfo, CommentListResponse, CreateFolderRequest, CreateGroupRequest,
    CreateGroupResponse, DeleteFolderRequest, FileInfo, FileListResponse, FileResponse,
    FolderListResponse, FolderNodeInfo, GroupInfo, GroupListResponse, GroupResponse,
    KickMemberRequest, MembershipRequest, MoveFileRequest, RenameFileRequest,
    RenameFolderRequest, SuccessResponse, TreeResponse, UploadResponse,
};
use super::error::{ErrorBody, ErrorCode};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "groupdrive API",
        description = "Group file sharing: groups joined by code, shared folders, file comments"
    ),
    paths(
        handlers::group::create_group,
        handlers::group::join_group,
        handlers::group::list_groups,
        handlers::group::leave_group,
        handlers::group::kick_member,
        handlers::group::get_group,
        handlers::file::upload_file,
        handlers::file::list_files,
        handlers::file::download_file,
        handlers::file::delete_file,
        handlers::file::rename_file,
        handlers::file::move_file,
        handlers::folder::create_folder,
        handlers::folder::rename_folder,
        handlers::folder::delete_folder,
        handlers::folder::folder_tree,
        handlers::folder::list_folders,
        handlers::comment::add_comment,
        handlers::comment::list_comments,
    ),
    components(schemas(
        ErrorBody,
        ErrorCode,
        CreateGroupRequest,
        MembershipRequest,
        KickMemberRequest,
        RenameFileRequest,
        MoveFileRequest,
        CreateFolderRequest,
        RenameFolderRequest,
        DeleteFolderRequest,
        AddCommentRequest,
        GroupInfo,
        FileInfo,
        CommentInfo,
        FolderNodeInfo,
        SuccessResponse,
        CreateGroupResponse,
        GroupResponse,
        GroupListResponse,
        UploadResponse,
        FileResponse,
        FileListResponse,
        TreeResponse,
        FolderListResponse,
        CommentListResponse,
    )),
    tags(
        (name = "groups", description = "Group membership"),
        (name = "files", description = "Shared files"),
        (name = "folders", description = "Folders of a group"),
        (name = "comments", description = "Comments on files")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/groups/create"));
        assert!(paths.contains_key("/api/groups/{code}/files/{filename}"));
        assert!(paths.contains_key("/api/groups/{code}/files/{filename}/comments"));
        assert_eq!(paths.len(), 16);
    }

    #[test]
    fn test_openapi_registers_error_body() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("ErrorBody"));
        assert!(schemas.contains_key("ErrorCode"));
    }
}
