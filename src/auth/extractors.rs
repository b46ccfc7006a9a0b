use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{jwt::JwtKeys, repo::User};
use crate::error::AppError;

/// Extracts and validates the bearer token, returning the user ID.
/// The subject must still be a user. Every failure is the same 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
    PgPool: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        else {
            debug!("missing Authorization header");
            return Err(AppError::Unauthorized);
        };

        let Some(token) = bearer_token(header) else {
            debug!("invalid auth scheme");
            return Err(AppError::Unauthorized);
        };

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!("invalid or expired token");
            AppError::from(e)
        })?;

        let db = PgPool::from_ref(state);
        if !User::exists(&db, claims.sub).await? {
            warn!(user_id = %claims.sub, "token for unknown user");
            return Err(AppError::Unauthorized);
        }

        Ok(AuthUser(claims.sub))
    }
}

/// `Bearer <token>` with a case-insensitive scheme.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
