//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, dashboard, fines, health, loans, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblioteca API",
        version = "0.1.0",
        description = "Library lending management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Dashboard
        dashboard::get_stats,
        // Libros
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book_status,
        // Socios
        members::list_members,
        members::get_member,
        members::create_member,
        // Prestamos
        loans::list_loans,
        loans::create_loan,
        loans::return_loan,
        // Multas
        fines::list_fines,
        fines::create_fine,
        fines::pay_fine,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Libros
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBookStatus,
            // Socios
            crate::models::member::Member,
            crate::models::member::MemberDetails,
            crate::models::member::CreateMember,
            // Prestamos
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::LoanHistoryEntry,
            crate::models::loan::ActiveLoan,
            crate::models::loan::LoanStatus,
            crate::models::loan::CreateLoan,
            crate::models::loan::ReturnRequest,
            // Multas
            crate::models::fine::Fine,
            crate::models::fine::FineDetails,
            crate::models::fine::FineStatus,
            crate::models::fine::CreateFine,
            // Dashboard
            dashboard::DashboardStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "dashboard", description = "Dashboard statistics"),
        (name = "libros", description = "Catalog management"),
        (name = "socios", description = "Membership management"),
        (name = "prestamos", description = "Loan management"),
        (name = "multas", description = "Fine management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
