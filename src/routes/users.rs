/// User Routes
///
/// CRUD on user records. Mounted under the auth gate, so every handler can
/// rely on a verified `SessionClaim` in the request.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, SessionClaim};
use crate::error::{AppError, DatabaseError, ErrorContext, ValidationError};
use crate::routes::auth::RegisterRequest;
use crate::store::{UserResponse, UserStore, UserUpdate};
use crate::validators::{parse_user_id, require_present_if_set};

/// Partial update body; absent fields are left unchanged
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn into_update(self) -> Result<UserUpdate, AppError> {
        let name = require_present_if_set("name", self.name)?;
        let email = require_present_if_set("email", self.email)?;
        let password_hash = match require_present_if_set("password", self.password)? {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        let update = UserUpdate {
            name,
            email,
            password_hash,
        };
        if update.is_empty() {
            return Err(ValidationError::InvalidFormat(
                "At least one of name, email or password is required".to_string(),
            )
            .into());
        }
        Ok(update)
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub inserted_id: String,
}

fn user_not_found() -> AppError {
    DatabaseError::NotFound("User not found".to_string()).into()
}

/// POST /users
pub async fn create_user(
    form: web::Json<RegisterRequest>,
    store: web::Data<dyn UserStore>,
    claim: web::ReqData<SessionClaim>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("create_user").with_actor(claim.email.clone());

    let request = form.into_inner();
    let new_user = web::block(move || request.into_new_user()).await??;
    let user_id = store.insert(new_user).await?;

    tracing::info!(
        request_id = %context.request_id,
        actor = ?context.actor,
        user_id = %user_id,
        "User created"
    );

    Ok(HttpResponse::Ok().json(CreatedResponse {
        inserted_id: user_id.to_string(),
    }))
}

/// GET /users
pub async fn list_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = store
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get_user(
    path: web::Path<String>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_user_id(&path)?;

    let user = store.find_by_id(user_id).await?.ok_or_else(user_not_found)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    path: web::Path<String>,
    form: web::Json<UpdateUserRequest>,
    store: web::Data<dyn UserStore>,
    claim: web::ReqData<SessionClaim>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("update_user").with_actor(claim.email.clone());
    let user_id = parse_user_id(&path)?;
    let request = form.into_inner();
    let changes = web::block(move || request.into_update()).await??;

    if !store.update(user_id, changes).await? {
        return Err(user_not_found());
    }

    tracing::info!(
        request_id = %context.request_id,
        actor = ?context.actor,
        user_id = %user_id,
        "User updated"
    );

    Ok(HttpResponse::Ok().body("User updated successfully"))
}

/// DELETE /users/{id}
pub async fn delete_user(
    path: web::Path<String>,
    store: web::Data<dyn UserStore>,
    claim: web::ReqData<SessionClaim>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("delete_user").with_actor(claim.email.clone());
    let user_id = parse_user_id(&path)?;

    if !store.delete(user_id).await? {
        return Err(user_not_found());
    }

    tracing::info!(
        request_id = %context.request_id,
        actor = ?context.actor,
        user_id = %user_id,
        "User deleted"
    );

    Ok(HttpResponse::Ok().body("User deleted successfully"))
}
