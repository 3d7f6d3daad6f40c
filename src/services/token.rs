use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Token lifetime in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// The claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The subject: the credential id, as a string.
    pub sub: String,
    /// Issued-at, as a Unix timestamp.
    pub iat: usize,
    /// Expiry, as a Unix timestamp.
    pub exp: usize,
}

/// Why a token was rejected. Both variants surface as the same external
/// status; the distinction exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally malformed, signature mismatch, or unparseable subject.
    Invalid,
    /// Well-formed and correctly signed, but past its expiry.
    Expired,
}

/// Issues and statelessly verifies signed, time-limited bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    /// Creates a new `TokenService` from the process-wide secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs: TOKEN_TTL_SECS,
        }
    }

    /// Creates a `TokenService` with a custom lifetime, for expiry tests.
    #[cfg(test)]
    fn with_ttl(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issues a token for the given subject, expiring `ttl_secs` from now.
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The credential id to embed as the subject.
    ///
    /// # Returns
    ///
    /// A `Result` containing the signed token string.
    pub fn issue(&self, subject_id: i32) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now.timestamp() + self.ttl_secs) as usize,
        };

        tracing::debug!("Issuing token for subject {}", subject_id);

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Verifies a token and extracts its subject.
    ///
    /// The signature is validated before the expiry check, so a tampered
    /// token is always `Invalid`, never `Expired`. No clock leeway: a token
    /// stops being honored exactly at its expiry.
    ///
    /// # Arguments
    ///
    /// * `token` - The token string presented by the client.
    ///
    /// # Returns
    ///
    /// The subject id, or a `TokenError`.
    pub fn verify(&self, token: &str) -> std::result::Result<i32, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims.sub.parse::<i32>().map_err(|_| TokenError::Invalid),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-12345";

    #[test]
    fn issued_token_verifies_to_same_subject() {
        let service = TokenService::new(SECRET);
        let token = service.issue(42).unwrap();
        assert_eq!(service.verify(&token), Ok(42));
    }

    #[test]
    fn expired_token_reports_expired() {
        let service = TokenService::with_ttl(SECRET, -10);
        let token = service.issue(42).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_token_is_invalid_never_expired() {
        let service = TokenService::new(SECRET);
        let token = service.issue(42).unwrap();

        // Flip the last signature character.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(service.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn token_from_different_secret_is_invalid() {
        let issuer = TokenService::new(b"secret-one");
        let verifier = TokenService::new(b"secret-two");
        let token = issuer.issue(7).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn empty_token_is_invalid() {
        let service = TokenService::new(SECRET);
        assert_eq!(service.verify(""), Err(TokenError::Invalid));
    }
}
