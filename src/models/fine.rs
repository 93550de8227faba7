//! Fine (multa) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Reason recorded on the fine created by a damaged return
pub const DAMAGED_RETURN_REASON: &str = "Libro devuelto con daños";

/// Amount of the damaged-return fine (150.00)
pub fn damaged_return_amount() -> Decimal {
    Decimal::new(15000, 2)
}

/// Default amount for a manually entered fine (100.00)
pub fn default_fine_amount() -> Decimal {
    Decimal::new(10000, 2)
}

/// Fine lifecycle state. Transitions `Pendiente → Pagada` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FineStatus {
    Pendiente,
    Pagada,
}

impl FineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FineStatus::Pendiente => "pendiente",
            FineStatus::Pagada => "pagada",
        }
    }
}

impl std::fmt::Display for FineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(FineStatus::Pendiente),
            "pagada" => Ok(FineStatus::Pagada),
            _ => Err(format!("Invalid fine status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for FineStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for FineStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for FineStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Fine model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fine {
    pub id: Uuid,
    pub socio_id: i32,
    pub prestamo_id: Option<Uuid>,
    pub motivo: String,
    pub monto: Decimal,
    pub fecha: DateTime<Utc>,
    pub estado: FineStatus,
}

/// Fine joined with the member's name for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FineDetails {
    pub id: Uuid,
    pub socio_id: i32,
    pub prestamo_id: Option<Uuid>,
    pub motivo: String,
    pub monto: Decimal,
    pub fecha: DateTime<Utc>,
    pub estado: FineStatus,
    pub socio_nombre: String,
}

/// Create fine request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFine {
    pub socio_id: i32,
    pub prestamo_id: Option<Uuid>,
    pub motivo: String,
    #[serde(default = "default_fine_amount")]
    pub monto: Decimal,
}

/// Fine listing filter
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct FineQuery {
    pub socio_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text_code() {
        for status in [FineStatus::Pendiente, FineStatus::Pagada] {
            assert_eq!(status.as_str().parse::<FineStatus>().unwrap(), status);
        }
    }

    #[test]
    fn create_fine_defaults_amount() {
        let fine: CreateFine =
            serde_json::from_str(r#"{"socio_id": 1, "motivo": "Retraso"}"#).unwrap();
        assert_eq!(fine.monto, default_fine_amount());
        assert!(fine.prestamo_id.is_none());
    }

    #[test]
    fn damaged_return_amount_is_150() {
        assert_eq!(damaged_return_amount(), Decimal::new(150, 0));
    }
}
