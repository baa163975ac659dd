//! Credential hashing and session token utilities.
//!
//! - Password hashing (Argon2id)
//! - Access/refresh token issuance and validation (HMAC-signed JWT)
//! - Authentication coordination
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
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SubjectClaims, TokenIssuer, TokenLifetimes};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", TokenLifetimes::default());
//! let subject = SubjectClaims::new("user123", "alice");
//! let pair = issuer.issue(&subject).unwrap();
//!
//! let claims = issuer.validate(&pair.refresh_token).unwrap();
//! assert_eq!(claims.subject, subject);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SubjectClaims, TokenLifetimes};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", TokenLifetimes::default());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint tokens
//! let subject = SubjectClaims::new("user123", "alice");
//! let pair = auth.authenticate("password123", &hash, &subject).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&pair.access_token).unwrap();
//! assert_eq!(claims.username(), "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SubjectClaims;
pub use jwt::TokenIssuer;
pub use jwt::TokenLifetimes;
pub use jwt::TokenPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
