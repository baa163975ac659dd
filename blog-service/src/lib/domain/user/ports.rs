use async_trait::async_trait;

use crate::domain::user::models::AuthTokens;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for the authentication service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Both duplicate checks complete before the password is hashed.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and plaintext password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username or email is already registered
    /// * `HashingError` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and mint an access/refresh token pair.
    ///
    /// # Arguments
    /// * `command` - Username or email, and plaintext password
    ///
    /// # Returns
    /// Access and refresh tokens for the user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `HashingError` - Stored hash could not be read
    /// * `TokenIssuanceFailed` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login_user(&self, command: LoginUserCommand) -> Result<AuthTokens, UserError>;

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed, wrongly signed, wrong algorithm or expired
    fn validate_token(&self, token: &str) -> Result<auth::Claims, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce username and email uniqueness on `create`;
/// that check is authoritative when registrations race.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user, assigning its identifier and timestamps.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username or email is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve the user whose username or email equals `identifier`.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username_or_email(&self, identifier: &str)
        -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}
