//! Catalog (books) service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDetails, BookStatus, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get a book with its loan history
    pub async fn get_book_details(&self, isbn: &str) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_isbn(isbn).await?;
        let history = self.repository.books.loan_history(isbn).await?;
        Ok(BookDetails::new(book, history))
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&book).await
    }

    /// Manually override the availability state of a book
    pub async fn set_book_status(&self, isbn: &str, estado: BookStatus) -> AppResult<Book> {
        self.repository.books.set_status(isbn, estado).await
    }
}
