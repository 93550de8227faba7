//! Error types for the Biblioteca server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes surfaced to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    AuthenticationFailed = 2,
    DbFailure = 3,
    BookNotFound = 4,
    MemberNotFound = 5,
    LoanNotActiveOrNotFound = 6,
    FineNotFound = 7,
    BookUnavailable = 8,
    MemberHasActiveLoan = 9,
    MemberHasPendingFine = 10,
    FineAlreadyPaid = 11,
    DuplicateIsbn = 12,
    DuplicateDocument = 13,
    BadValue = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Authentication(String),

    #[error("El libro no existe")]
    BookNotFound(String),

    #[error("El socio no existe")]
    MemberNotFound(i32),

    #[error("El préstamo no existe o ya fue devuelto")]
    LoanNotActive(uuid::Uuid),

    #[error("Multa no encontrada")]
    FineNotFound(uuid::Uuid),

    #[error("El libro no está disponible")]
    BookUnavailable(String),

    #[error("El socio ya tiene un préstamo activo")]
    MemberHasActiveLoan(i32),

    #[error("El socio tiene multas pendientes de pago")]
    MemberHasPendingFine(i32),

    #[error("La multa ya fue pagada")]
    FineAlreadyPaid(uuid::Uuid),

    #[error("El ISBN ya existe")]
    DuplicateIsbn(String),

    #[error("El número de documento ya está registrado")]
    DuplicateDocument(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// Stable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) => ErrorCode::AuthenticationFailed,
            AppError::BookNotFound(_) => ErrorCode::BookNotFound,
            AppError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            AppError::LoanNotActive(_) => ErrorCode::LoanNotActiveOrNotFound,
            AppError::FineNotFound(_) => ErrorCode::FineNotFound,
            AppError::BookUnavailable(_) => ErrorCode::BookUnavailable,
            AppError::MemberHasActiveLoan(_) => ErrorCode::MemberHasActiveLoan,
            AppError::MemberHasPendingFine(_) => ErrorCode::MemberHasPendingFine,
            AppError::FineAlreadyPaid(_) => ErrorCode::FineAlreadyPaid,
            AppError::DuplicateIsbn(_) => ErrorCode::DuplicateIsbn,
            AppError::DuplicateDocument(_) => ErrorCode::DuplicateDocument,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::BookNotFound(_)
            | AppError::MemberNotFound(_)
            | AppError::FineNotFound(_) => StatusCode::NOT_FOUND,
            AppError::LoanNotActive(_)
            | AppError::DuplicateIsbn(_)
            | AppError::DuplicateDocument(_) => StatusCode::CONFLICT,
            AppError::BookUnavailable(_)
            | AppError::MemberHasActiveLoan(_)
            | AppError::MemberHasPendingFine(_)
            | AppError::FineAlreadyPaid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Error interno del servidor".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Error interno del servidor".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
