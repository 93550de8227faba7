//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LoanDetails, LoanQuery, ReturnRequest},
};

use super::AuthenticatedUser;

/// List loans, optionally filtered by state
#[utoipa::path(
    get,
    path = "/prestamos",
    tag = "prestamos",
    security(("bearer_auth" = [])),
    params(LoanQuery),
    responses(
        (status = 200, description = "List of loans with display fields", body = Vec<LoanDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.list_loans(query.estado).await?;
    Ok(Json(loans))
}

/// Issue a loan (checks eligibility rules atomically)
#[utoipa::path(
    post,
    path = "/prestamos",
    tag = "prestamos",
    security(("bearer_auth" = [])),
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 404, description = "Book or member not found"),
        (status = 422, description = "Book unavailable, member has an active loan or pending fines")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.issue_loan(request).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Register the return of a loan; a damaged book creates a fine
#[utoipa::path(
    put,
    path = "/prestamos/{id}/devolucion",
    tag = "prestamos",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Loan ID")
    ),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Loan returned", body = Loan),
        (status = 409, description = "Loan not found or already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<Loan>> {
    let loan = state
        .services
        .loans
        .register_return(id, request.libro_danado)
        .await?;
    Ok(Json(loan))
}
