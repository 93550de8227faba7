//! Loans repository for database operations.
//!
//! Issuance and return are the two places where several entities must move
//! together. Both run inside a single transaction with `SELECT ... FOR UPDATE`
//! row locks, so two concurrent requests touching the same book or member
//! serialize: one commits, the other observes the updated state and fails its
//! precondition. Locks are always taken in the same order (member, then book)
//! so concurrent issuances cannot deadlock. The partial unique indexes on
//! `prestamos` remain as a schema-level backstop for the one-active-loan
//! invariants.

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookStatus},
        fine::{damaged_return_amount, FineStatus, DAMAGED_RETURN_REASON},
        loan::{CreateLoan, Loan, LoanDetails, LoanStatus},
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List loans, optionally filtered by state, joined with display fields
    pub async fn list(&self, estado: Option<LoanStatus>) -> AppResult<Vec<LoanDetails>> {
        let base = r#"
            SELECT p.id, p.libro_isbn, p.socio_id, p.fecha_inicio, p.fecha_devolucion, p.estado,
                   COALESCE(l.titulo, 'Desconocido') as libro_titulo,
                   COALESCE(l.autor, 'Desconocido') as libro_autor,
                   COALESCE(s.nombre, 'Desconocido') as socio_nombre
            FROM prestamos p
            LEFT JOIN libros l ON p.libro_isbn = l.isbn
            LEFT JOIN socios s ON p.socio_id = s.numero_socio
            "#;

        let loans = match estado {
            Some(estado) => {
                let query = format!("{} WHERE p.estado = $1 ORDER BY p.fecha_inicio DESC", base);
                sqlx::query_as::<_, LoanDetails>(&query)
                    .bind(estado)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("{} ORDER BY p.fecha_inicio DESC", base);
                sqlx::query_as::<_, LoanDetails>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(loans)
    }

    /// Issue a loan. All eligibility preconditions are evaluated under row
    /// locks and the loan insert plus book flip commit atomically:
    ///   - the member exists
    ///   - the member has no active loan
    ///   - the member has no pending fine
    ///   - the book exists and is available
    pub async fn issue(&self, loan: &CreateLoan) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let member: Option<i32> = sqlx::query_scalar(
            "SELECT numero_socio FROM socios WHERE numero_socio = $1 FOR UPDATE",
        )
        .bind(loan.socio_id)
        .fetch_optional(&mut *tx)
        .await?;

        if member.is_none() {
            return Err(AppError::MemberNotFound(loan.socio_id));
        }

        let has_active_loan: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM prestamos WHERE socio_id = $1 AND estado = 'activo')",
        )
        .bind(loan.socio_id)
        .fetch_one(&mut *tx)
        .await?;

        if has_active_loan {
            return Err(AppError::MemberHasActiveLoan(loan.socio_id));
        }

        let has_pending_fine: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM multas WHERE socio_id = $1 AND estado = 'pendiente')",
        )
        .bind(loan.socio_id)
        .fetch_one(&mut *tx)
        .await?;

        if has_pending_fine {
            return Err(AppError::MemberHasPendingFine(loan.socio_id));
        }

        let book = sqlx::query_as::<_, Book>("SELECT * FROM libros WHERE isbn = $1 FOR UPDATE")
            .bind(&loan.libro_isbn)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::BookNotFound(loan.libro_isbn.clone()))?;

        if book.estado != BookStatus::Disponible {
            return Err(AppError::BookUnavailable(loan.libro_isbn.clone()));
        }

        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO prestamos (id, libro_isbn, socio_id, fecha_inicio, fecha_devolucion, estado)
            VALUES ($1, $2, $3, $4, NULL, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&loan.libro_isbn)
        .bind(loan.socio_id)
        .bind(Utc::now())
        .bind(LoanStatus::Activo)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE libros SET estado = $1 WHERE isbn = $2")
            .bind(BookStatus::Prestado)
            .bind(&loan.libro_isbn)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Register the return of a loan: close the loan, release the book and,
    /// for a damaged book, create the pending fine in the same transaction so
    /// it is visible to any later eligibility check as soon as this commits.
    pub async fn register_return(&self, loan_id: Uuid, libro_danado: bool) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM prestamos WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::LoanNotActive(loan_id))?;

        if loan.estado != LoanStatus::Activo {
            return Err(AppError::LoanNotActive(loan_id));
        }

        let now = Utc::now();

        let returned = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE prestamos SET estado = $1, fecha_devolucion = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(LoanStatus::Devuelto)
        .bind(now)
        .bind(loan_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE libros SET estado = $1 WHERE isbn = $2")
            .bind(BookStatus::Disponible)
            .bind(&loan.libro_isbn)
            .execute(&mut *tx)
            .await?;

        if libro_danado {
            sqlx::query(
                r#"
                INSERT INTO multas (id, socio_id, prestamo_id, motivo, monto, fecha, estado)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(loan.socio_id)
            .bind(loan_id)
            .bind(DAMAGED_RETURN_REASON)
            .bind(damaged_return_amount())
            .bind(now)
            .bind(FineStatus::Pendiente)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(returned)
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM prestamos WHERE estado = 'activo'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
