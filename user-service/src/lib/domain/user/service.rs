use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::IdentityVerifier;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, IV>
where
    UR: UserRepository,
    IV: IdentityVerifier,
{
    repository: Arc<UR>,
    verifier: Arc<IV>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, IV> UserService<UR, IV>
where
    UR: UserRepository,
    IV: IdentityVerifier,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `verifier` - Blacklist check implementation
    pub fn new(repository: Arc<UR>, verifier: Arc<IV>) -> Self {
        Self {
            repository,
            verifier,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR, IV> UserServicePort for UserService<UR, IV>
where
    UR: UserRepository,
    IV: IdentityVerifier,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Fail fast before any external traffic
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let outcome = self
            .verifier
            .check(
                command.id_number.as_str(),
                command.name.as_str(),
                command.email.as_str(),
            )
            .await
            .map_err(|e| {
                tracing::warn!(email = %command.email, error = %e, "Identity verification failed");
                UserError::from(e)
            })?;

        if outcome.is_blacklisted {
            let reason = outcome.reason.unwrap_or_default();
            tracing::warn!(
                email = %command.email,
                status = %outcome.status,
                reason = %reason,
                "Registration rejected by blacklist"
            );
            return Err(UserError::Blacklisted(reason));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.expose())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let now = Utc::now();
        let new_user = NewUser {
            name: command.name,
            email: command.email,
            password_hash,
            id_number: command.id_number,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.repository.find_by_id(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.repository.find_by_email(email).await
    }

    async fn update_user(&self, mut user: User) -> Result<User, UserError> {
        user.updated_at = Utc::now();
        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
