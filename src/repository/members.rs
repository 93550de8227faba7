//! Members repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        fine::Fine,
        loan::ActiveLoan,
        member::{CreateMember, Member},
    },
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all members
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM socios ORDER BY numero_socio")
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    /// Get member by number
    pub async fn get_by_id(&self, numero_socio: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM socios WHERE numero_socio = $1")
            .bind(numero_socio)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::MemberNotFound(numero_socio))
    }

    /// Create a new member; the database sequence assigns numero_socio
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM socios WHERE nro_documento = $1)")
                .bind(&member.nro_documento)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            return Err(AppError::DuplicateDocument(member.nro_documento.clone()));
        }

        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO socios (nombre, nro_documento, fecha_registro)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&member.nombre)
        .bind(&member.nro_documento)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// The member's current loan, joined with the book title
    pub async fn active_loan(&self, numero_socio: i32) -> AppResult<Option<ActiveLoan>> {
        let loan = sqlx::query_as::<_, ActiveLoan>(
            r#"
            SELECT p.id, p.libro_isbn, COALESCE(l.titulo, 'Desconocido') as libro_titulo,
                   p.fecha_inicio
            FROM prestamos p
            LEFT JOIN libros l ON p.libro_isbn = l.isbn
            WHERE p.socio_id = $1 AND p.estado = 'activo'
            "#,
        )
        .bind(numero_socio)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    /// The member's unpaid fines
    pub async fn pending_fines(&self, numero_socio: i32) -> AppResult<Vec<Fine>> {
        let fines = sqlx::query_as::<_, Fine>(
            r#"
            SELECT * FROM multas
            WHERE socio_id = $1 AND estado = 'pendiente'
            ORDER BY fecha
            "#,
        )
        .bind(numero_socio)
        .fetch_all(&self.pool)
        .await?;

        Ok(fines)
    }

    /// Count all members
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM socios")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
