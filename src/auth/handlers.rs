use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    auth::{
        dto::{RegisterRequest, TokenResponse},
        extractors::AuthUser,
        password::hash_password,
        repo::User,
        services::{authenticate, is_valid_email, normalize_email, Credentials},
    },
    error::{AppError, AppResult, FieldError},
    extract::ApiJson,
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    payload.email = normalize_email(&payload.email);

    let mut problems = Vec::new();
    if !is_valid_email(&payload.email) {
        problems.push(FieldError::new("email", "value is not a valid email address"));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        problems.push(FieldError::new(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if !problems.is_empty() {
        warn!(fields = problems.len(), "invalid registration");
        return Err(AppError::Validation(problems));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        debug!("registration for an existing email");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let full_name = payload
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let user = User::create(&state.db, &payload.email, &hash, full_name)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict("Email already registered".into());
                }
            }
            error!(error = %e, "create user failed");
            AppError::Database(e)
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, creds))]
pub async fn login(
    State(state): State<AppState>,
    Credentials(creds): Credentials,
) -> AppResult<Json<TokenResponse>> {
    let Some(user) = authenticate(&state.db, &creds.email, &creds.password).await? else {
        return Err(AppError::Unauthorized);
    };

    let access_token = state.keys.issue(user.id, None)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse::bearer(access_token)))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<User>> {
    match User::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(user_id = %user_id, "token for unknown user");
            Err(AppError::Unauthorized)
        }
    }
}
