use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::SubjectClaims;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenLifetimes;
use crate::jwt::TokenPair;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with the default Argon2id hasher.
    ///
    /// # Arguments
    /// * `jwt_secret` - Shared HMAC secret
    /// * `lifetimes` - Access and refresh token lifetimes
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self::with_hasher(PasswordHasher::new(), jwt_secret, lifetimes)
    }

    /// Create an authenticator around an explicitly configured hasher.
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        jwt_secret: &[u8],
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(jwt_secret, lifetimes),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and, on success, mint tokens for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &SubjectClaims,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject)?)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, algorithm, structure or expiry check failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_issuer.validate(token)
    }
}
