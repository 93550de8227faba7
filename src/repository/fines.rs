//! Fines repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::fine::{CreateFine, Fine, FineDetails, FineStatus},
};

#[derive(Clone)]
pub struct FinesRepository {
    pool: Pool<Postgres>,
}

impl FinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List fines, optionally filtered by member, joined with the member name
    pub async fn list(&self, socio_id: Option<i32>) -> AppResult<Vec<FineDetails>> {
        let base = r#"
            SELECT m.id, m.socio_id, m.prestamo_id, m.motivo, m.monto, m.fecha, m.estado,
                   COALESCE(s.nombre, 'Desconocido') as socio_nombre
            FROM multas m
            LEFT JOIN socios s ON m.socio_id = s.numero_socio
            "#;

        let fines = match socio_id {
            Some(socio_id) => {
                let query = format!("{} WHERE m.socio_id = $1 ORDER BY m.fecha DESC", base);
                sqlx::query_as::<_, FineDetails>(&query)
                    .bind(socio_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("{} ORDER BY m.fecha DESC", base);
                sqlx::query_as::<_, FineDetails>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(fines)
    }

    /// Create a fine
    pub async fn create(&self, fine: &CreateFine) -> AppResult<Fine> {
        let created = sqlx::query_as::<_, Fine>(
            r#"
            INSERT INTO multas (id, socio_id, prestamo_id, motivo, monto, fecha, estado)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fine.socio_id)
        .bind(fine.prestamo_id)
        .bind(&fine.motivo)
        .bind(fine.monto)
        .bind(Utc::now())
        .bind(FineStatus::Pendiente)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Mark a fine as paid. The transition is guarded under a row lock:
    /// a second payment attempt fails instead of silently re-updating.
    pub async fn mark_paid(&self, fine_id: Uuid) -> AppResult<Fine> {
        let mut tx = self.pool.begin().await?;

        let fine = sqlx::query_as::<_, Fine>("SELECT * FROM multas WHERE id = $1 FOR UPDATE")
            .bind(fine_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::FineNotFound(fine_id))?;

        if fine.estado == FineStatus::Pagada {
            return Err(AppError::FineAlreadyPaid(fine_id));
        }

        let paid = sqlx::query_as::<_, Fine>(
            "UPDATE multas SET estado = $1 WHERE id = $2 RETURNING *",
        )
        .bind(FineStatus::Pagada)
        .bind(fine_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(paid)
    }

    /// Count pending fines
    pub async fn count_pending(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM multas WHERE estado = 'pendiente'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
