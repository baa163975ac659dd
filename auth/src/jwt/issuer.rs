use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::claims::SubjectClaims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Lifetimes of the two tokens minted at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access: Duration,
    refresh: Duration,
}

impl TokenLifetimes {
    /// Upper bound on either lifetime, in days (about a century).
    pub const MAX_DAYS: i64 = 36_500;

    /// # Errors
    /// * `InvalidLifetimes` - A lifetime is not positive, exceeds
    ///   [`TokenLifetimes::MAX_DAYS`], or access is not shorter than refresh
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, JwtError> {
        if access <= Duration::zero() || refresh <= Duration::zero() {
            return Err(JwtError::InvalidLifetimes(
                "token lifetimes must be positive".to_string(),
            ));
        }
        if access.num_days() > Self::MAX_DAYS || refresh.num_days() > Self::MAX_DAYS {
            return Err(JwtError::InvalidLifetimes(format!(
                "token lifetimes must not exceed {} days",
                Self::MAX_DAYS
            )));
        }
        if access >= refresh {
            return Err(JwtError::InvalidLifetimes(format!(
                "access lifetime ({}s) must be shorter than refresh lifetime ({}s)",
                access.num_seconds(),
                refresh.num_seconds()
            )));
        }

        Ok(Self { access, refresh })
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

impl Default for TokenLifetimes {
    /// One hour access, seven days refresh.
    fn default() -> Self {
        Self {
            access: Duration::hours(1),
            refresh: Duration::days(7),
        }
    }
}

/// Access and refresh tokens minted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates the access/refresh token pair.
///
/// Both tokens carry the same claim shape and differ only in `exp`. There is
/// no server-side record of issued tokens.
pub struct TokenIssuer {
    handler: JwtHandler,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetimes,
        }
    }

    /// Sign an access and a refresh token for `subject`, both issued now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or an expiration is out of range
    pub fn issue(&self, subject: &SubjectClaims) -> Result<TokenPair, JwtError> {
        let now = Utc::now();
        let access = Claims::new(subject.clone(), now, self.lifetimes.access)?;
        let refresh = Claims::new(subject.clone(), now, self.lifetimes.refresh)?;

        Ok(TokenPair {
            access_token: self.handler.encode(&access)?,
            refresh_token: self.handler.encode(&refresh)?,
        })
    }

    /// Verify a token minted by [`TokenIssuer::issue`] and return its claims.
    ///
    /// # Errors
    /// See [`JwtHandler::decode`].
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.handler.decode(token)
    }
}
