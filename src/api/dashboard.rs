//! Dashboard endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Summary counters over current entity state
#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    /// Total number of books
    pub total_libros: i64,
    /// Books currently available
    pub libros_disponibles: i64,
    /// Total number of members
    pub total_socios: i64,
    /// Loans currently active
    pub prestamos_activos: i64,
    /// Fines awaiting payment
    pub multas_pendientes: i64,
}

/// Get the dashboard counters
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.get_dashboard_stats().await?;
    Ok(Json(stats))
}
