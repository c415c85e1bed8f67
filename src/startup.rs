use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::auth::SessionKeys;
use crate::error::{AppError, ValidationError};
use crate::middleware::{AuthGate, RequestLogger};
use crate::routes::{
    create_user, delete_user, get_user, health_check, list_users, login, register, update_user,
};
use crate::store::UserStore;

/// Unparseable JSON bodies become a 400 with the same plain-text shape as
/// every other handler error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(ValidationError::InvalidPayload(err.to_string())).into()
    })
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    keys: SessionKeys,
) -> Result<Server, std::io::Error> {
    let store = web::Data::from(store);
    let keys_data = web::Data::new(keys.clone());

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(RequestLogger)

            // Shared state
            .app_data(json_config())
            .app_data(store.clone())
            .app_data(keys_data.clone())

            // Public routes
            .route("/health_check", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))

            // Protected routes (require a session token)
            .service(
                web::scope("/users")
                    .wrap(AuthGate::new(keys.clone()))
                    .route("", web::post().to(create_user))
                    .route("", web::get().to(list_users))
                    .route("/{id}", web::get().to(get_user))
                    .route("/{id}", web::put().to(update_user))
                    .route("/{id}", web::delete().to(delete_user)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
