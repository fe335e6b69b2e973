use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_validity: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Claims encoded in `access_token`
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator issuing tokens valid for
    /// [`Claims::DEFAULT_VALIDITY_HOURS`].
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_validity: Duration::hours(Claims::DEFAULT_VALIDITY_HOURS),
        }
    }

    /// Override the token validity window.
    pub fn with_token_validity(mut self, token_validity: Duration) -> Self {
        self.token_validity = token_validity;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for the given identity.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier placed in the token
    /// * `email` - Email placed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_user(user_id, email, self.token_validity);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, user_id: i64, email: &str) -> Result<String, JwtError> {
        self.jwt_handler
            .encode(&Claims::for_user(user_id, email, self.token_validity))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is empty, malformed, wrongly signed or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("my_password", &hash, 5, "a@x.com")
            .expect("Authentication failed");
        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded, result.claims);
        assert_eq!(decoded.user_id, 5);
        assert_eq!(decoded.email, "a@x.com");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, 5, "a@x.com");
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.authenticate("my_password", "plaintext", 5, "a@x.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(PasswordError::MalformedHash(_)))
        ));
    }

    #[test]
    fn test_issue_token_uses_configured_validity() {
        let authenticator = Authenticator::new(SECRET).with_token_validity(Duration::minutes(10));

        let token = authenticator.issue_token(9, "b@x.com").unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_validate_token_from_other_secret() {
        let issuer = Authenticator::new(b"another_secret_key_at_least_32_bytes");
        let validator = Authenticator::new(SECRET);

        let token = issuer.issue_token(1, "c@x.com").unwrap();
        assert_eq!(
            validator.validate_token(&token),
            Err(JwtError::InvalidSignature)
        );
    }
}
