//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookStatus, CreateBook},
        loan::LoanHistoryEntry,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM libros ORDER BY titulo")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM libros WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }

    /// Full loan history of a book, joined with member names
    pub async fn loan_history(&self, isbn: &str) -> AppResult<Vec<LoanHistoryEntry>> {
        let history = sqlx::query_as::<_, LoanHistoryEntry>(
            r#"
            SELECT p.id, p.socio_id, COALESCE(s.nombre, 'Desconocido') as socio_nombre,
                   p.fecha_inicio, p.fecha_devolucion, p.estado
            FROM prestamos p
            LEFT JOIN socios s ON p.socio_id = s.numero_socio
            WHERE p.libro_isbn = $1
            ORDER BY p.fecha_inicio DESC
            "#,
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM libros WHERE isbn = $1)")
            .bind(&book.isbn)
            .fetch_one(&self.pool)
            .await?;

        if exists {
            return Err(AppError::DuplicateIsbn(book.isbn.clone()));
        }

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO libros (isbn, titulo, autor, imagen_url, estado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.titulo)
        .bind(&book.autor)
        .bind(&book.imagen_url)
        .bind(BookStatus::Disponible)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Manually override the availability state of a book
    pub async fn set_status(&self, isbn: &str, estado: BookStatus) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "UPDATE libros SET estado = $1 WHERE isbn = $2 RETURNING *",
        )
        .bind(estado)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM libros")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count available books
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM libros WHERE estado = 'disponible'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
