/// Middleware module
///
/// Session authentication for protected scopes and request logging.

mod auth_gate;
mod request_logger;

pub use auth_gate::{authenticate, AuthGate, BEARER_PREFIX};
pub use request_logger::RequestLogger;
