use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// Algorithms accepted when verifying a token. Anything outside the HMAC
/// family (including `none` and asymmetric algorithms) is rejected.
const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT encoder/decoder bound to a shared HMAC secret.
///
/// Generic over the claims type. Signs with HS256.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtHandler {
    /// Create a new HS256 handler.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret (at least 32 bytes recommended)
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify and decode a JWT.
    ///
    /// The signature must verify against the shared secret, the header
    /// algorithm must be in the HMAC family, and `sub` and `exp` must be
    /// present. Expiry is checked without leeway.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidSignature` - Signature does not match
    /// * `AlgorithmMismatch` - Header names a non-HMAC algorithm
    /// * `MissingClaim` - `sub` or `exp` absent
    /// * `DecodingFailed` - Token is malformed
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => JwtError::AlgorithmMismatch,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde::Deserialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
        exp: i64,
    }

    fn test_claims(exp: i64) -> TestClaims {
        TestClaims {
            sub: "user123".to_string(),
            role: "author".to_string(),
            exp,
        }
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = test_claims(Utc::now().timestamp() + 60);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage() {
        let handler = JwtHandler::new(SECRET);
        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let token = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!")
            .encode(&test_claims(Utc::now().timestamp() + 60))
            .unwrap();

        let result =
            JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::InvalidSignature);
    }

    #[test]
    fn test_decode_expired() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&test_claims(Utc::now().timestamp() - 5))
            .unwrap();

        let result = handler.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::TokenExpired);
    }

    #[test]
    fn test_decode_requires_exp() {
        #[derive(Serialize)]
        struct NoExpiry {
            sub: String,
        }

        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&NoExpiry {
                sub: "user123".to_string(),
            })
            .unwrap();

        let result = handler.decode::<serde_json::Value>(&token);
        assert_eq!(result.unwrap_err(), JwtError::MissingClaim("exp".to_string()));
    }

    #[test]
    fn test_decode_rejects_unsigned_token() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&test_claims(Utc::now().timestamp() + 60))
            .unwrap();

        // Same payload behind an `{"alg":"none","typ":"JWT"}` header, no signature.
        let payload = token.split('.').nth(1).unwrap();
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);

        assert!(handler.decode::<TestClaims>(&forged).is_err());
    }

    #[test]
    fn test_decode_accepts_other_hmac_algorithms() {
        let claims = test_claims(Utc::now().timestamp() + 60);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let decoded: TestClaims = JwtHandler::new(SECRET).decode(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_asymmetric_header() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&test_claims(Utc::now().timestamp() + 60))
            .unwrap();

        // `{"alg":"RS256","typ":"JWT"}` over an HMAC-signed payload.
        let mut parts = token.split('.').skip(1);
        let payload = parts.next().unwrap();
        let signature = parts.next().unwrap();
        let forged = format!("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.{}.{}", payload, signature);

        assert_eq!(
            handler.decode::<TestClaims>(&forged).unwrap_err(),
            JwtError::AlgorithmMismatch
        );
    }
}
