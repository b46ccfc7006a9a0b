use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateInterview, InterviewQuery, UpdateInterview},
    repo::Interview,
};
use crate::{
    applications::Application,
    auth::AuthUser,
    error::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
    scoped::Scoped,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/interviews", get(list_interviews).post(create_interview))
        .route(
            "/interviews/:id",
            get(get_interview)
                .put(update_interview)
                .patch(update_interview)
                .delete(delete_interview),
        )
}

#[instrument(skip(state))]
pub async fn list_interviews(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(query): ApiQuery<InterviewQuery>,
) -> AppResult<Json<Vec<Interview>>> {
    let interviews = Scoped::new(&state.db, user_id).list(&query).await?;
    Ok(Json(interviews))
}

#[instrument(skip(state))]
pub async fn get_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Interview>> {
    let interview = Scoped::new(&state.db, user_id).get::<Interview>(id).await?;
    Ok(Json(interview))
}

#[instrument(skip(state, body))]
pub async fn create_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<CreateInterview>,
) -> AppResult<(StatusCode, Json<Interview>)> {
    let scoped = Scoped::new(&state.db, user_id);
    scoped
        .require::<Application>("application_id", body.application_id)
        .await?;
    let interview = scoped.insert(body).await?;
    info!(%user_id, interview_id = %interview.id, "interview created");
    Ok((StatusCode::CREATED, Json(interview)))
}

#[instrument(skip(state, body))]
pub async fn update_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateInterview>,
) -> AppResult<Json<Interview>> {
    let scoped = Scoped::new(&state.db, user_id);
    if let Some(application_id) = body.application_id {
        scoped
            .require::<Application>("application_id", application_id)
            .await?;
    }
    let interview = scoped.update(id, body).await?;
    Ok(Json(interview))
}

#[instrument(skip(state))]
pub async fn delete_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    Scoped::new(&state.db, user_id)
        .delete::<Interview>(id)
        .await?;
    info!(%user_id, interview_id = %id, "interview deleted");
    Ok(StatusCode::NO_CONTENT)
}
