//! Catalog (books) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, CreateBook, UpdateBookStatus},
};

use super::AuthenticatedUser;

/// List all books
#[utoipa::path(
    get,
    path = "/libros",
    tag = "libros",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get a book with its loan history
#[utoipa::path(
    get,
    path = "/libros/{isbn}",
    tag = "libros",
    security(("bearer_auth" = [])),
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookDetails>> {
    let details = state.services.catalog.get_book_details(&isbn).await?;
    Ok(Json(details))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/libros",
    tag = "libros",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Manually override a book's availability state
#[utoipa::path(
    put,
    path = "/libros/{isbn}/estado",
    tag = "libros",
    security(("bearer_auth" = [])),
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = UpdateBookStatus,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(isbn): Path<String>,
    Json(request): Json<UpdateBookStatus>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .catalog
        .set_book_status(&isbn, request.estado)
        .await?;
    Ok(Json(book))
}
