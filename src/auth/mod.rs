/// Authentication module
///
/// Password hashing, session token issuing/verification, and the claim that
/// travels inside a token.

mod claims;
mod jwt;
mod password;

pub use claims::SessionClaim;
pub use claims::SESSION_LIFETIME_SECS;
pub use jwt::SessionKeys;
pub use password::hash_password;
pub use password::verify_password;
