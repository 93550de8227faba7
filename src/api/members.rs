//! Membership (socios) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::member::{CreateMember, Member, MemberDetails},
};

use super::AuthenticatedUser;

/// List all members
#[utoipa::path(
    get,
    path = "/socios",
    tag = "socios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of members", body = Vec<Member>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list_members().await?;
    Ok(Json(members))
}

/// Get a member with their current loan and pending fines
#[utoipa::path(
    get,
    path = "/socios/{numero_socio}",
    tag = "socios",
    security(("bearer_auth" = [])),
    params(
        ("numero_socio" = i32, Path, description = "Member number")
    ),
    responses(
        (status = 200, description = "Member details", body = MemberDetails),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(numero_socio): Path<i32>,
) -> AppResult<Json<MemberDetails>> {
    let details = state
        .services
        .members
        .get_member_details(numero_socio)
        .await?;
    Ok(Json(details))
}

/// Register a new member; the server assigns the member number
#[utoipa::path(
    post,
    path = "/socios",
    tag = "socios",
    security(("bearer_auth" = [])),
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Document number already registered")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(member): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let created = state.services.members.create_member(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
