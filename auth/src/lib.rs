//! Authentication primitives for the user service.
//!
//! - Password hashing (Argon2id)
//! - HS256 bearer token signing and validation
//! - Authentication coordination
//!
//! Nothing here touches storage; resolving a token's subject to a stored
//! user is the service's job.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user(1, "a@x.com", Duration::hours(24));
//! let token = handler.encode(&claims).unwrap();
//! assert_eq!(handler.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Login flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let hash = auth.hash_password("password123").unwrap();
//!
//! let result = auth.authenticate("password123", &hash, 1, "a@x.com").unwrap();
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
