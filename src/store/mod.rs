/// User Store
///
/// Persistence of user records behind the `UserStore` trait. Handlers only see
/// `web::Data<dyn UserStore>`; the server runs on Postgres and the test suite
/// on the in-memory store.

mod memory;
mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

/// A stored user. `password_hash` never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return its generated id
    ///
    /// # Errors
    /// `DatabaseError::UniqueConstraintViolation` if the email is taken
    async fn insert(&self, user: NewUser) -> Result<Uuid, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// All users in insertion order
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Returns `false` if no user has this id
    async fn update(&self, id: Uuid, changes: UserUpdate) -> Result<bool, AppError>;

    /// Returns `false` if no user has this id
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
