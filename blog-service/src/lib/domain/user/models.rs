use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account. `password_hash` is an Argon2 PHC string
/// and must never leave the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account data handed to the store; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Any non-blank name is accepted as long as it cannot be mistaken for an
/// email address at login, so `@` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Blank` - Username is empty or whitespace only
    /// * `ContainsAtSign` - Username contains `@`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }
        if username.contains('@') {
            return Err(UsernameError::ContainsAtSign);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    /// # Errors
    /// * `MissingField` - Password is empty
    pub fn new(username: Username, email: EmailAddress, password: String) -> Result<Self, UserError> {
        if password.is_empty() {
            return Err(UserError::MissingField("password"));
        }

        Ok(Self {
            username,
            email,
            password,
        })
    }
}

/// Command to log in with a username or an email plus password.
#[derive(Debug)]
pub struct LoginUserCommand {
    pub username_or_email: String,
    pub password: String,
}

impl LoginUserCommand {
    /// The identifier is not validated beyond being present: an identifier
    /// that could never match must fail the same way as an unknown one.
    ///
    /// # Errors
    /// * `MissingField` - Identifier or password is empty
    pub fn new(username_or_email: String, password: String) -> Result<Self, UserError> {
        if username_or_email.trim().is_empty() {
            return Err(UserError::MissingField("username_or_email"));
        }
        if password.is_empty() {
            return Err(UserError::MissingField("password"));
        }

        Ok(Self {
            username_or_email,
            password,
        })
    }
}

/// Access and refresh tokens returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<auth::TokenPair> for AuthTokens {
    fn from(pair: auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        let long = "a".repeat(200);
        for name in ["al", "j.doe", "Zoë Smith", "a", long.as_str()] {
            assert!(Username::new(name.to_string()).is_ok(), "{name}");
        }
        assert_eq!(Username::new(String::new()), Err(UsernameError::Blank));
        assert_eq!(Username::new("   ".to_string()), Err(UsernameError::Blank));
        assert_eq!(
            Username::new("alice@example.com".to_string()),
            Err(UsernameError::ContainsAtSign)
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new(String::new()).is_err());
    }

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_register_command_requires_password() {
        let result = RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            String::new(),
        );
        assert!(matches!(result, Err(UserError::MissingField("password"))));
    }

    #[test]
    fn test_login_command_requires_both_fields() {
        assert!(matches!(
            LoginUserCommand::new("  ".to_string(), "pw".to_string()),
            Err(UserError::MissingField("username_or_email"))
        ));
        assert!(matches!(
            LoginUserCommand::new("alice".to_string(), String::new()),
            Err(UserError::MissingField("password"))
        ));
        assert!(LoginUserCommand::new("alice".to_string(), "pw".to_string()).is_ok());
    }
}
