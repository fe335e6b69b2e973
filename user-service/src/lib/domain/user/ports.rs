use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::VerificationOutcome;
use crate::user::errors::UserError;
use crate::user::errors::VerificationError;

/// Port for user registration and management.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Checks the email first, then the blacklist, then hashes and stores.
    ///
    /// # Returns
    /// Created user entity carrying its store-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `VerificationFailed` - Blacklist service could not be reached
    /// * `Blacklisted` - Blacklist service rejected the user
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by identifier. Absence is `Ok(None)`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email. Absence is `Ok(None)`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Persist a fetched-and-mutated user, refreshing `updated_at`.
    ///
    /// Email uniqueness and blacklist status are not re-checked here.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, user: User) -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Port for login and bearer token handling.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Authenticate by email and password.
    ///
    /// # Returns
    /// The user and a freshly issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or the lookup failed
    /// * `TokenGeneration` - Token could not be signed
    async fn login(&self, email: &str, password: &str) -> Result<(User, String), UserError>;

    /// Issue a token for an already authenticated user.
    ///
    /// # Errors
    /// * `TokenGeneration` - Token could not be signed
    fn generate_token(&self, user: &User) -> Result<String, UserError>;

    /// Validate a token and resolve its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Empty, malformed, wrongly signed or expired token
    /// * `NotFound` - Subject no longer exists or could not be looked up
    async fn validate_token(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user and assign its identifier.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

/// Third-party identity check (blacklist).
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Check whether the identity is disqualified from registering.
    ///
    /// # Errors
    /// * `RequestFailed` - Transport error or timeout
    /// * `UnexpectedStatus` - Service answered with an unexpected status
    /// * `InvalidResponse` - Response body could not be decoded
    async fn check(
        &self,
        id_number: &str,
        name: &str,
        email: &str,
    ) -> Result<VerificationOutcome, VerificationError>;
}
