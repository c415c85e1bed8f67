//! Auth gate behaviour in isolation: a counting handler behind the gate shows
//! exactly when the wrapped service runs.

use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use user_api::auth::{SessionClaim, SessionKeys};
use user_api::middleware::AuthGate;

fn test_keys() -> SessionKeys {
    SessionKeys::from_secret(b"auth-gate-test-secret").expect("Failed to build keys")
}

async fn whoami(claim: web::ReqData<SessionClaim>, calls: web::Data<AtomicUsize>) -> HttpResponse {
    calls.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().body(claim.email.clone())
}

macro_rules! gated_app {
    ($calls:expr, $keys:expr) => {
        test::init_service(
            App::new().app_data($calls.clone()).service(
                web::scope("/protected")
                    .wrap(AuthGate::new($keys))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_header_never_reaches_handler() {
    let calls = web::Data::new(AtomicUsize::new(0));
    let app = gated_app!(calls, test_keys());

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = test::read_body(resp).await;
    assert_eq!(body, web::Bytes::from_static(b"Authorization header required"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let calls = web::Data::new(AtomicUsize::new(0));
    let app = gated_app!(calls, test_keys());

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = test::read_body(resp).await;
    assert_eq!(body, web::Bytes::from_static(b"Invalid token"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let calls = web::Data::new(AtomicUsize::new(0));
    let keys = test_keys();
    let issued_long_ago = chrono::Utc::now() - chrono::Duration::days(2);
    let token = keys
        .issue_at("alice@example.com", issued_long_ago)
        .expect("Failed to issue token");
    let app = gated_app!(calls, keys);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn fresh_token_runs_handler_exactly_once() {
    let calls = web::Data::new(AtomicUsize::new(0));
    let keys = test_keys();
    let token = keys.issue("alice@example.com").expect("Failed to issue token");
    let app = gated_app!(calls, keys);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, web::Bytes::from_static(b"alice@example.com"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
