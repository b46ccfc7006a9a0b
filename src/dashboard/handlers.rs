use axum::{extract::State, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::{debug, instrument};

use super::{dto::DashboardStats, repo};
use crate::{auth::AuthUser, error::AppResult, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(get_stats))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = repo::load_stats(&state.db, user_id, OffsetDateTime::now_utc()).await?;
    debug!(%user_id, total = stats.total_applications, "dashboard stats loaded");
    Ok(Json(stats))
}
