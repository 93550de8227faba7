//! Dashboard statistics service

use crate::{api::dashboard::DashboardStats, error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compute the dashboard counters from current entity state.
    /// No state of its own: recomputed on each query.
    pub async fn get_dashboard_stats(&self) -> AppResult<DashboardStats> {
        let total_libros = self.repository.books.count().await?;
        let libros_disponibles = self.repository.books.count_available().await?;
        let total_socios = self.repository.members.count().await?;
        let prestamos_activos = self.repository.loans.count_active().await?;
        let multas_pendientes = self.repository.fines.count_pending().await?;

        Ok(DashboardStats {
            total_libros,
            libros_disponibles,
            total_socios,
            prestamos_activos,
            multas_pendientes,
        })
    }
}
