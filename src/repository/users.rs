//! Staff users repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::Usuario,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Usuario> {
        sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::Authentication("Usuario no encontrado".to_string()))
    }

    /// Get user by username (primary authentication method)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Usuario>> {
        let user = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a staff user with an already-hashed password
    pub async fn create(&self, username: &str, password_hash: &str, nombre: &str) -> AppResult<Usuario> {
        let created = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (id, username, password, nombre)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(nombre)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
