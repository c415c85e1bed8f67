/// Session Auth Gate
///
/// Verifies the bearer token on every request to a wrapped scope and injects
/// the resulting `SessionClaim` into request extensions, where handlers read
/// it with `web::ReqData<SessionClaim>`. Rejected requests get a plain-text
/// 401 and never reach the wrapped service.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, ContentType, AUTHORIZATION},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::{SessionClaim, SessionKeys};
use crate::error::{AuthError, TokenError};

/// Stripped from the header value when present, case-sensitively
pub const BEARER_PREFIX: &str = "Bearer ";

/// Middleware guarding routes that need a valid session token
pub struct AuthGate {
    keys: SessionKeys,
}

impl AuthGate {
    pub fn new(keys: SessionKeys) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AuthGateService {
            service: Rc::new(service),
            keys: self.keys.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
    keys: SessionKeys,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(req.headers().get(AUTHORIZATION), &self.keys) {
            Ok(claim) => {
                tracing::debug!(email = %claim.email, "Session token verified");
                req.extensions_mut().insert(claim);

                let service = self.service.clone();
                Box::pin(async move {
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                })
            }
            Err(rejection) => {
                tracing::warn!(
                    path = %req.path(),
                    reason = %rejection,
                    "Rejected unauthenticated request"
                );
                let response = HttpResponse::Unauthorized()
                    .content_type(ContentType::plaintext())
                    .body(rejection.public_message());

                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Resolve the `Authorization` header to a verified claim
///
/// An absent or empty header is `MissingToken`. The `Bearer ` prefix is
/// removed only when present; whatever remains goes to the verifier as-is.
pub fn authenticate(
    header: Option<&HeaderValue>,
    keys: &SessionKeys,
) -> Result<SessionClaim, AuthError> {
    let header = header
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingToken)?;
    let value = header
        .to_str()
        .map_err(|_| AuthError::Token(TokenError::Malformed))?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);

    keys.verify(token).map_err(AuthError::Token)
}
