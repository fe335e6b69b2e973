use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Login and bearer token validation backed by the user store.
///
/// Tokens are stateless: a token is accepted while its signature is valid,
/// it has not expired, and its subject still resolves in the store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<(User, String), UserError> {
        // Unknown email, store failure and bad password are indistinguishable to the caller
        let user = match self.repository.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(email = %email, "Login rejected: unknown email");
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Login rejected: lookup failed");
                return Err(UserError::InvalidCredentials);
            }
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.0, user.email.as_str())
            .map_err(|e| match &e {
                AuthenticationError::JwtError(err) => UserError::TokenGeneration(err.to_string()),
                AuthenticationError::InvalidCredentials | AuthenticationError::PasswordError(_) => {
                    tracing::warn!(user_id = %user.id, error = %e, "Login rejected");
                    UserError::InvalidCredentials
                }
            })?;

        tracing::info!(
            user_id = %user.id,
            expires_at = result.claims.exp,
            "User logged in"
        );
        Ok((user, result.access_token))
    }

    fn generate_token(&self, user: &User) -> Result<String, UserError> {
        self.authenticator
            .issue_token(user.id.0, user.email.as_str())
            .map_err(|e| UserError::TokenGeneration(e.to_string()))
    }

    async fn validate_token(&self, token: &str) -> Result<User, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            UserError::InvalidToken(e.to_string())
        })?;

        let user_id = UserId(claims.user_id);
        match self.repository.find_by_id(&user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UserError::NotFound(user_id.to_string())),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Token subject lookup failed");
                Err(UserError::NotFound(user_id.to_string()))
            }
        }
    }
}
