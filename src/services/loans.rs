//! Loan management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LoanDetails, LoanStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List loans, optionally filtered by state
    pub async fn list_loans(&self, estado: Option<LoanStatus>) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list(estado).await
    }

    /// Issue a loan (eligibility rules enforced atomically by the repository)
    pub async fn issue_loan(&self, loan: CreateLoan) -> AppResult<Loan> {
        self.repository.loans.issue(&loan).await
    }

    /// Register the return of a loan
    pub async fn register_return(&self, loan_id: Uuid, libro_danado: bool) -> AppResult<Loan> {
        self.repository.loans.register_return(loan_id, libro_danado).await
    }
}
