use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity facts about the authenticated subject.
///
/// This is what a caller supplies at issuance and gets back after validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username of the subject
    pub username: String,
}

impl SubjectClaims {
    pub fn new(sub: impl ToString, username: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
            username: username.to_string(),
        }
    }
}

/// Full token payload: the subject plus issuance and expiration times.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(flatten)]
    pub subject: SubjectClaims,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject` valid for `lifetime` starting at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiration falls outside the representable range
    pub fn new(
        subject: SubjectClaims,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed("token expiration is out of range".to_string())
        })?;

        Ok(Self {
            subject,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.subject.sub
    }

    pub fn username(&self) -> &str {
        &self.subject.username
    }
}
