//! Authentication service for staff users

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{UserClaims, Usuario},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username/password and return a JWT token plus the user
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, Usuario)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Usuario o contraseña incorrectos".to_string())
            })?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Usuario o contraseña incorrectos".to_string(),
            ));
        }

        let token = self.create_token(&user)?;

        Ok((token, user))
    }

    /// Get the authenticated user behind a set of claims
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Usuario> {
        self.repository.users.get_by_id(id).await
    }

    /// Create JWT token for a user
    fn create_token(&self, user: &Usuario) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &Usuario, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Create the default staff account on first startup if it does not exist
    pub async fn seed_default_admin(&self) -> AppResult<()> {
        let existing = self
            .repository
            .users
            .get_by_username(&self.config.default_admin_username)
            .await?;

        if existing.is_none() {
            let hash = self.hash_password(&self.config.default_admin_password)?;
            self.repository
                .users
                .create(
                    &self.config.default_admin_username,
                    &hash,
                    &self.config.default_admin_name,
                )
                .await?;
            tracing::info!(
                "Default staff user created: {}",
                self.config.default_admin_username
            );
        }

        Ok(())
    }
}
