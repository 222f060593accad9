//! Group handlers for the API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    CreateGroupRequest, CreateGroupResponse, GroupInfo, GroupListResponse, GroupResponse,
    KickMemberRequest, ListGroupsQuery, MembershipRequest, SuccessResponse, ValidatedJson,
    ValidatedQuery,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/groups/create - Create a group.
#[utoipa::path(
    post,
    path = "/api/groups/create",
    tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = CreateGroupResponse),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateGroupRequest>,
) -> Result<Json<CreateGroupResponse>, ApiError> {
    let group = state
        .store
        .create_group(&req.group_name, &req.username)
        .await?;

    Ok(Json(CreateGroupResponse {
        code: group.code.clone(),
        group: group.into(),
    }))
}

/// POST /api/groups/join - Join a group by code.
#[utoipa::path(
    post,
    path = "/api/groups/join",
    tag = "groups",
    request_body = MembershipRequest,
    responses(
        (status = 200, description = "Joined", body = GroupResponse),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn join_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<MembershipRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    let group = state.store.join_group(&req.code, &req.username).await?;
    Ok(Json(GroupResponse {
        group: group.into(),
    }))
}

/// GET /api/groups/list - List a user's groups in join order.
#[utoipa::path(
    get,
    path = "/api/groups/list",
    tag = "groups",
    params(ListGroupsQuery),
    responses(
        (status = 200, description = "Groups of the user", body = GroupListResponse),
        (status = 400, description = "Missing username")
    )
)]
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListGroupsQuery>,
) -> Result<Json<GroupListResponse>, ApiError> {
    let groups = state.store.groups_for_user(&query.username).await?;
    Ok(Json(GroupListResponse {
        groups: groups.into_iter().map(GroupInfo::from).collect(),
    }))
}

/// POST /api/groups/leave - Leave a group.
#[utoipa::path(
    post,
    path = "/api/groups/leave",
    tag = "groups",
    request_body = MembershipRequest,
    responses(
        (status = 200, description = "Left", body = SuccessResponse),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn leave_group(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<MembershipRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.store.leave_group(&req.code, &req.username).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/groups/kick - Remove a member (admin only).
#[utoipa::path(
    post,
    path = "/api/groups/kick",
    tag = "groups",
    request_body = KickMemberRequest,
    responses(
        (status = 200, description = "Member removed", body = SuccessResponse),
        (status = 403, description = "Requester is not the admin, or kicked themselves"),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn kick_member(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<KickMemberRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .store
        .kick_member(&req.code, &req.member, &req.requester)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/groups/:code - Get a group.
#[utoipa::path(
    get,
    path = "/api/groups/{code}",
    tag = "groups",
    params(
        ("code" = String, Path, description = "Group code")
    ),
    responses(
        (status = 200, description = "Group details", body = GroupResponse),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<GroupResponse>, ApiError> {
    let group = state.store.get_group(&code).await?;
    Ok(Json(GroupResponse {
        group: group.into(),
    }))
}
