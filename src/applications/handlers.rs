use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ApplicationQuery, CreateApplication, UpdateApplication},
    repo::Application,
};
use crate::{
    auth::AuthUser,
    companies::Company,
    error::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
    scoped::Scoped,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list_applications).post(create_application))
        .route(
            "/applications/:id",
            get(get_application)
                .put(update_application)
                .patch(update_application)
                .delete(delete_application),
        )
}

#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(query): ApiQuery<ApplicationQuery>,
) -> AppResult<Json<Vec<Application>>> {
    let applications = Scoped::new(&state.db, user_id).list(&query).await?;
    Ok(Json(applications))
}

#[instrument(skip(state))]
pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Application>> {
    let application = Scoped::new(&state.db, user_id)
        .get::<Application>(id)
        .await?;
    Ok(Json(application))
}

#[instrument(skip(state, body))]
pub async fn create_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<CreateApplication>,
) -> AppResult<(StatusCode, Json<Application>)> {
    body.validate()?;
    let scoped = Scoped::new(&state.db, user_id);
    scoped
        .require::<Company>("company_id", body.company_id)
        .await?;
    let application = scoped.insert(body).await?;
    info!(
        %user_id,
        application_id = %application.id,
        status = %application.status,
        "application created"
    );
    Ok((StatusCode::CREATED, Json(application)))
}

#[instrument(skip(state, body))]
pub async fn update_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateApplication>,
) -> AppResult<Json<Application>> {
    body.validate()?;
    let scoped = Scoped::new(&state.db, user_id);
    if let Some(company_id) = body.company_id {
        scoped.require::<Company>("company_id", company_id).await?;
    }
    let application = scoped.update(id, body).await?;
    Ok(Json(application))
}

#[instrument(skip(state))]
pub async fn delete_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    Scoped::new(&state.db, user_id)
        .delete::<Application>(id)
        .await?;
    info!(%user_id, application_id = %id, "application deleted");
    Ok(StatusCode::NO_CONTENT)
}
