//! Member (socio) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::fine::Fine;
use super::loan::ActiveLoan;

/// Member model from database.
///
/// `numero_socio` is assigned by the database sequence and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub numero_socio: i32,
    pub nombre: String,
    pub nro_documento: String,
    pub fecha_registro: DateTime<Utc>,
}

/// Member detail view: the member plus their current loan (if any)
/// and unpaid fines, joined at query time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberDetails {
    pub numero_socio: i32,
    pub nombre: String,
    pub nro_documento: String,
    pub fecha_registro: DateTime<Utc>,
    pub prestamo_activo: Option<ActiveLoan>,
    pub multas_pendientes: Vec<Fine>,
}

impl MemberDetails {
    pub fn new(member: Member, prestamo_activo: Option<ActiveLoan>, multas_pendientes: Vec<Fine>) -> Self {
        Self {
            numero_socio: member.numero_socio,
            nombre: member.nombre,
            nro_documento: member.nro_documento,
            fecha_registro: member.fecha_registro,
            prestamo_activo,
            multas_pendientes,
        }
    }
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "El número de documento es obligatorio"))]
    pub nro_documento: String,
}
