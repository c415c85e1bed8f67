/// Password Hashing and Verification
///
/// bcrypt at its default cost. Hashes are salted, so the same password never
/// hashes to the same string twice, and only the hash is ever stored.
///
/// bcrypt only reads the first 72 bytes of its input. Longer passwords are
/// refused at hashing time and never verify, so two passwords sharing a
/// 72-byte prefix can't stand in for each other.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, ValidationError};

/// Longest password bcrypt reads in full
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password using bcrypt
///
/// # Errors
/// Returns a validation error for passwords over `MAX_PASSWORD_BYTES`, and an
/// internal error if bcrypt fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::InvalidFormat(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ))
        .into());
    }

    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash
///
/// A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.len() > MAX_PASSWORD_BYTES {
        return false;
    }

    match verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            false
        }
    }
}
