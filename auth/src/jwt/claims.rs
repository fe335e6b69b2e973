use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token claims.
///
/// Carries the user identity (`user_id`, `email`) plus the RFC 7519 time
/// claims. Both `iat` and `exp` are always present; tokens without them
/// are rejected at decode time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the user the token was issued to
    pub user_id: i64,

    /// Email of the user at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Default validity window of an access token.
    pub const DEFAULT_VALIDITY_HOURS: i64 = 24;

    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email
    /// * `validity` - Time until the token expires
    pub fn for_user(user_id: i64, email: impl Into<String>, validity: Duration) -> Self {
        Self::issued_at(user_id, email, Utc::now(), validity)
    }

    /// Create claims for a user with an explicit issuance instant.
    pub fn issued_at(
        user_id: i64,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
        }
    }
}
