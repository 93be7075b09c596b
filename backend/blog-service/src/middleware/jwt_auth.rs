/// Bearer-token authentication for the admin surface
///
/// Validates `Authorization: Bearer <token>` against the shared-secret
/// scheme in `auth-core` and attaches the decoded [`AdminIdentity`] to the
/// request. Handlers receive the identity as an explicit extractor argument;
/// nothing downstream reads ambient auth state.
use crate::error::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Verified admin identity extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: String,
}

/// JWT Authentication Middleware
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| AppError::Unauthorized("Token missing".to_string()))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| AppError::Unauthorized("Token missing".to_string()))?;

            let token_data = auth_core::validate_token(token).map_err(|e| {
                tracing::warn!("token validation failed: {}", e);
                AppError::Unauthorized("Invalid token".to_string())
            })?;

            req.extensions_mut().insert(AdminIdentity {
                email: token_data.claims.email,
            });

            service.call(req).await
        })
    }
}

/// FromRequest implementation for AdminIdentity
impl actix_web::FromRequest for AdminIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<AdminIdentity>() {
            Some(identity) => ready(Ok(identity.clone())),
            None => ready(Err(
                AppError::Unauthorized("Not authenticated".to_string()).into()
            )),
        }
    }
}
