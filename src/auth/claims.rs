/// Session Claim
///
/// The identity facts carried inside a session token. A claim is built once at
/// login, signed into a token and never mutated afterwards. Expiry is the only
/// way it stops being valid.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of every issued session token
pub const SESSION_LIFETIME_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaim {
    /// Authenticated user's email
    pub email: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl SessionClaim {
    /// Claim for `email` issued at `issued_at`, expiring a session lifetime later
    pub fn new(email: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            exp: (issued_at + Duration::seconds(SESSION_LIFETIME_SECS)).timestamp(),
        }
    }

    /// Strict comparison: a claim is still valid at exactly `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_claim_expires_one_day_after_issue() {
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let claim = SessionClaim::new("alice@example.com", issued_at);

        assert_eq!(claim.email, "alice@example.com");
        assert_eq!(claim.exp, issued_at.timestamp() + 86_400);
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let claim = SessionClaim::new("alice@example.com", issued_at);
        let expiry = issued_at + Duration::seconds(SESSION_LIFETIME_SECS);

        assert!(!claim.is_expired_at(issued_at));
        assert!(!claim.is_expired_at(expiry));
        assert!(claim.is_expired_at(expiry + Duration::seconds(1)));
    }
}
