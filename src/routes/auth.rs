/// Authentication Routes
///
/// Public endpoints: account registration and login.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password, SessionKeys};
use crate::error::{AppError, AuthError, DatabaseError, ErrorContext};
use crate::store::{NewUser, UserStore};
use crate::validators::require_present;

/// User registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    /// Presence-checks every field and hashes the password
    pub fn into_new_user(self) -> Result<NewUser, AppError> {
        require_present("name", &self.name)?;
        require_present("email", &self.email)?;
        require_present("password", &self.password)?;

        Ok(NewUser {
            password_hash: hash_password(&self.password)?,
            name: self.name,
            email: self.email,
        })
    }
}

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /register
///
/// # Errors
/// - 400: missing field or unparseable body
/// - 409: email already registered
/// - 500: hashing or store failure
pub async fn register(
    form: web::Json<RegisterRequest>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_registration");

    let request = form.into_inner();
    let new_user = web::block(move || request.into_new_user()).await??;
    let user_id = store.insert(new_user).await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user_id,
        "User registered successfully"
    );

    Ok(HttpResponse::Ok().body("User created successfully"))
}

/// POST /login
///
/// Returns `{"token": "<session token>"}` valid for one day.
///
/// # Errors
/// - 400: missing field or unparseable body
/// - 401: wrong password
/// - 404: no user with this email
/// - 500: token signing failure
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn UserStore>,
    keys: web::Data<SessionKeys>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");

    let LoginRequest { email, password } = form.into_inner();
    require_present("email", &email)?;
    require_present("password", &password)?;

    let user = store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))?;

    // bcrypt runs on the blocking pool, not the worker thread
    let stored_hash = user.password_hash.clone();
    if !web::block(move || verify_password(&password, &stored_hash)).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = keys.issue(&user.email)?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
