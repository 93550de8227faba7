//! Fine management service

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::fine::{CreateFine, Fine, FineDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct FinesService {
    repository: Repository,
}

impl FinesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List fines, optionally filtered by member
    pub async fn list_fines(&self, socio_id: Option<i32>) -> AppResult<Vec<FineDetails>> {
        self.repository.fines.list(socio_id).await
    }

    /// Create a fine manually
    pub async fn create_fine(&self, fine: CreateFine) -> AppResult<Fine> {
        if fine.motivo.trim().is_empty() {
            return Err(AppError::Validation("El motivo es obligatorio".to_string()));
        }
        if fine.monto <= Decimal::ZERO {
            return Err(AppError::Validation(
                "El monto debe ser mayor que cero".to_string(),
            ));
        }

        // Verify the member exists (FK also backs this)
        self.repository.members.get_by_id(fine.socio_id).await?;

        self.repository.fines.create(&fine).await
    }

    /// Mark a fine as paid; fails if already paid
    pub async fn mark_paid(&self, fine_id: Uuid) -> AppResult<Fine> {
        self.repository.fines.mark_paid(fine_id).await
    }
}
