/// Session Token Issuing and Verification
///
/// Tokens are HS256 JWTs (`header.claims.signature`, each segment base64url)
/// signed with the process-wide secret held by `SessionKeys`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::auth::claims::SessionClaim;
use crate::error::{ConfigError, SigningError, TokenError};

/// Signing and verification keys derived from the server secret
///
/// Built once at startup and shared read-only by the login handler and the
/// auth gate.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    /// # Errors
    /// Returns `ConfigError::MissingRequired` if the secret is empty
    pub fn from_secret(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingRequired("auth.secret".to_string()));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// Issue a session token for `email`, valid for one day from now
    pub fn issue(&self, email: &str) -> Result<String, SigningError> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, SigningError> {
        let claim = SessionClaim::new(email, now);

        encode(&Header::new(Algorithm::HS256), &claim, &self.encoding)
            .map_err(|e| SigningError(e.to_string()))
    }

    /// Validate a token's structure, signature and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<SessionClaim, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// # Errors
    /// - `TokenError::Malformed` for anything that is not a decodable HS256 JWT
    /// - `TokenError::InvalidSignature` if the signature does not match
    /// - `TokenError::Expired` if `now` is past the `exp` claim
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaim, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is still required, but compared against `now` below
        validation.validate_exp = false;
        validation.leeway = 0;

        let claim = decode::<SessionClaim>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)?;

        if claim.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claim)
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::SESSION_LIFETIME_SECS;
    use chrono::Duration;

    fn test_keys() -> SessionKeys {
        SessionKeys::from_secret(b"test-secret-key-at-least-32-characters-long")
            .expect("Failed to build keys")
    }

    #[test]
    fn test_issue_and_verify_token() {
        let keys = test_keys();
        let token = keys.issue("alice@example.com").expect("Failed to issue token");
        let claim = keys.verify(&token).expect("Failed to verify token");

        assert_eq!(claim.email, "alice@example.com");
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_token_expires_after_one_day() {
        let keys = test_keys();
        let issued_at = Utc::now();
        let token = keys
            .issue_at("alice@example.com", issued_at)
            .expect("Failed to issue token");

        let last_valid = issued_at + Duration::seconds(SESSION_LIFETIME_SECS);
        assert!(keys.verify_at(&token, last_valid).is_ok());

        let result = keys.verify_at(&token, last_valid + Duration::seconds(1));
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_flipped_signature_byte() {
        let keys = test_keys();
        let token = keys.issue("alice@example.com").expect("Failed to issue token");

        let signature_start = token.rfind('.').expect("token has no signature") + 1;
        let mut bytes = token.into_bytes();
        bytes[signature_start] = if bytes[signature_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).expect("token is ascii");

        assert_eq!(keys.verify(&tampered).unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_token_from_other_secret() {
        let other = SessionKeys::from_secret(b"a-completely-different-secret-value")
            .expect("Failed to build keys");
        let token = other.issue("alice@example.com").expect("Failed to issue token");

        assert_eq!(test_keys().verify(&token).unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_malformed_tokens() {
        let keys = test_keys();

        for token in ["garbage", "", "invalid.token.here", "a.b"] {
            assert_eq!(
                keys.verify(token).unwrap_err(),
                TokenError::Malformed,
                "expected {:?} to be malformed",
                token
            );
        }
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(SessionKeys::from_secret(b"").is_err());
    }
}
