mod auth;
mod users;

use actix_web::HttpResponse;

pub use auth::{login, register, LoginRequest, RegisterRequest, TokenResponse};
pub use users::{create_user, delete_user, get_user, list_users, update_user, UpdateUserRequest};

/// GET /health_check
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
