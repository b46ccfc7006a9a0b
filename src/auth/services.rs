use axum::{
    async_trait,
    extract::{Form, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::{
    dto::{LoginForm, LoginRequest},
    password::verify_password,
    repo::User,
};
use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Looks the user up by email and checks the password. Unknown email and
/// wrong password are both `None`.
pub async fn authenticate(
    db: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<User>, sqlx::Error> {
    let email = normalize_email(email);
    let Some(user) = User::find_by_email(db, &email).await? else {
        debug!("login for unknown account");
        return Ok(None);
    };
    if !verify_password(password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Ok(None);
    }
    Ok(Some(user))
}

/// Login credentials from either a JSON body or an OAuth2 password form.
/// Any malformed body is treated as failed authentication.
pub struct Credentials(pub LoginRequest);

#[async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let creds = if is_form {
            let Form(form) = Form::<LoginForm>::from_request(req, state)
                .await
                .map_err(|e| {
                    warn!(error = %e.body_text(), "malformed login form");
                    AppError::Unauthorized
                })?;
            LoginRequest::from(form)
        } else {
            let Json(body) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    warn!(error = %e.body_text(), "malformed login body");
                    AppError::Unauthorized
                })?;
            body
        };
        Ok(Credentials(creds))
    }
}
