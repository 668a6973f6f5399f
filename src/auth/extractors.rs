use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{
    claims::{Identity, Role},
    jwt::JwtKeys,
};
use crate::response::ApiError;

/// Verifies the bearer token and yields the caller's identity.
pub struct AuthUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::unauthorized("Please login first", "missing Authorization header")
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| {
                ApiError::unauthorized("Please login first", "invalid Authorization header")
            })?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::unauthorized("Invalid or expired token", e)
        })?;

        Ok(AuthUser(claims.into()))
    }
}

async fn authorize(
    identity: Identity,
    allowed: &[Role],
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !allowed.contains(&identity.role) {
        warn!(user_id = %identity.id, role = %identity.role, "role not allowed");
        return Err(ApiError::forbidden(
            "You do not have access to this resource",
            format!("role '{}' is not allowed", identity.role),
        ));
    }
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Route guard: role `user` only.
pub async fn require_user(
    AuthUser(identity): AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(identity, &[Role::User], req, next).await
}

/// Route guard: any signed-in account (`admin` or `user`).
pub async fn require_member(
    AuthUser(identity): AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(identity, &[Role::Admin, Role::User], req, next).await
}
