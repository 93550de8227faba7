//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::loan::LoanHistoryEntry;

/// Availability state of a book.
///
/// Derived state: `Prestado` iff an active loan references the book. The
/// loans repository flips it inside the same transaction that creates or
/// closes the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Disponible,
    Prestado,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Disponible => "disponible",
            BookStatus::Prestado => "prestado",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disponible" => Ok(BookStatus::Disponible),
            "prestado" => Ok(BookStatus::Prestado),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

// SQLx conversion: the status is stored as its lowercase text code
impl sqlx::Type<Postgres> for BookStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub titulo: String,
    pub autor: String,
    pub imagen_url: Option<String>,
    pub estado: BookStatus,
}

/// Book with its full loan history for the detail view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub isbn: String,
    pub titulo: String,
    pub autor: String,
    pub imagen_url: Option<String>,
    pub estado: BookStatus,
    pub historial_prestamos: Vec<LoanHistoryEntry>,
}

impl BookDetails {
    pub fn new(book: Book, historial_prestamos: Vec<LoanHistoryEntry>) -> Self {
        Self {
            isbn: book.isbn,
            titulo: book.titulo,
            autor: book.autor,
            imagen_url: book.imagen_url,
            estado: book.estado,
            historial_prestamos,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "El ISBN es obligatorio"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub titulo: String,
    #[validate(length(min = 1, message = "El autor es obligatorio"))]
    pub autor: String,
    pub imagen_url: Option<String>,
}

/// Manual book status override request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookStatus {
    pub estado: BookStatus,
}
