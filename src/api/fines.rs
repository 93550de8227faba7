//! Fine management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::fine::{CreateFine, Fine, FineDetails, FineQuery},
};

use super::AuthenticatedUser;

/// List fines, optionally filtered by member
#[utoipa::path(
    get,
    path = "/multas",
    tag = "multas",
    security(("bearer_auth" = [])),
    params(FineQuery),
    responses(
        (status = 200, description = "List of fines with member names", body = Vec<FineDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_fines(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<FineQuery>,
) -> AppResult<Json<Vec<FineDetails>>> {
    let fines = state.services.fines.list_fines(query.socio_id).await?;
    Ok(Json(fines))
}

/// Create a fine manually
#[utoipa::path(
    post,
    path = "/multas",
    tag = "multas",
    security(("bearer_auth" = [])),
    request_body = CreateFine,
    responses(
        (status = 201, description = "Fine created", body = Fine),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn create_fine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<CreateFine>,
) -> AppResult<(StatusCode, Json<Fine>)> {
    let fine = state.services.fines.create_fine(request).await?;
    Ok((StatusCode::CREATED, Json(fine)))
}

/// Mark a fine as paid; the transition is irreversible
#[utoipa::path(
    put,
    path = "/multas/{id}/pagar",
    tag = "multas",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Fine ID")
    ),
    responses(
        (status = 200, description = "Fine paid", body = Fine),
        (status = 404, description = "Fine not found"),
        (status = 422, description = "Fine already paid")
    )
)]
pub async fn pay_fine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Fine>> {
    let fine = state.services.fines.mark_paid(id).await?;
    Ok(Json(fine))
}
