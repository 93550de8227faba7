//! Loan (préstamo) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Loan lifecycle state. Transitions `Activo → Devuelto` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Activo,
    Devuelto,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Activo => "activo",
            LoanStatus::Devuelto => "devuelto",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activo" => Ok(LoanStatus::Activo),
            "devuelto" => Ok(LoanStatus::Devuelto),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: Uuid,
    pub libro_isbn: String,
    pub socio_id: i32,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_devolucion: Option<DateTime<Utc>>,
    pub estado: LoanStatus,
}

/// Loan joined with book and member display fields for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: Uuid,
    pub libro_isbn: String,
    pub socio_id: i32,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_devolucion: Option<DateTime<Utc>>,
    pub estado: LoanStatus,
    pub libro_titulo: String,
    pub libro_autor: String,
    pub socio_nombre: String,
}

/// One entry of a book's loan history (joined with the member's name)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LoanHistoryEntry {
    pub id: Uuid,
    pub socio_id: i32,
    pub socio_nombre: String,
    pub fecha_inicio: DateTime<Utc>,
    pub fecha_devolucion: Option<DateTime<Utc>>,
    pub estado: LoanStatus,
}

/// A member's current loan (joined with the book's title)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ActiveLoan {
    pub id: Uuid,
    pub libro_isbn: String,
    pub libro_titulo: String,
    pub fecha_inicio: DateTime<Utc>,
}

/// Create loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub libro_isbn: String,
    pub socio_id: i32,
}

/// Return request; a damaged book triggers an automatic fine
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnRequest {
    #[serde(default)]
    pub libro_danado: bool,
}

/// Loan listing filter
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    pub estado: Option<LoanStatus>,
}
