use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SubjectClaims;

use crate::domain::user::models::AuthTokens;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Authentication service: registration, login and token validation.
///
/// Holds no mutable state. The store, hasher and token settings are all
/// injected at construction.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let (by_username, by_email) = tokio::try_join!(
            self.repository
                .find_by_username_or_email(command.username.as_str()),
            self.repository
                .find_by_username_or_email(command.email.as_str()),
        )?;

        if by_username.is_some() || by_email.is_some() {
            tracing::info!(
                username = %command.username,
                "Registration rejected: username or email already registered"
            );
            return Err(UserError::UserAlreadyExists);
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::HashingError(e.to_string()))?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login_user(&self, command: LoginUserCommand) -> Result<AuthTokens, UserError> {
        let Some(user) = self
            .repository
            .find_by_username_or_email(&command.username_or_email)
            .await?
        else {
            tracing::debug!("Login rejected: unknown identifier");
            return Err(UserError::InvalidCredentials);
        };

        let subject = SubjectClaims::new(user.id, user.username.as_str());

        let tokens = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, &subject)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => UserError::HashingError(err.to_string()),
                AuthenticationError::JwtError(err) => {
                    UserError::TokenIssuanceFailed(err.to_string())
                }
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(tokens.into())
    }

    fn validate_token(&self, token: &str) -> Result<auth::Claims, UserError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            UserError::TokenInvalid
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
