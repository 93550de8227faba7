//! Membership service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all members
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Get a member with their current loan and pending fines
    pub async fn get_member_details(&self, numero_socio: i32) -> AppResult<MemberDetails> {
        let member = self.repository.members.get_by_id(numero_socio).await?;
        let prestamo_activo = self.repository.members.active_loan(numero_socio).await?;
        let multas_pendientes = self.repository.members.pending_fines(numero_socio).await?;
        Ok(MemberDetails::new(member, prestamo_activo, multas_pendientes))
    }

    /// Register a new member
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.members.create(&member).await
    }
}
