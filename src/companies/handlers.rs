use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CompanyQuery, CreateCompany, UpdateCompany},
    repo::Company,
};
use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
    scoped::Scoped,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/:id",
            get(get_company)
                .put(update_company)
                .patch(update_company)
                .delete(delete_company),
        )
}

#[instrument(skip(state))]
pub async fn list_companies(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(query): ApiQuery<CompanyQuery>,
) -> AppResult<Json<Vec<Company>>> {
    let companies = Scoped::new(&state.db, user_id).list(&query).await?;
    Ok(Json(companies))
}

#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Company>> {
    let company = Scoped::new(&state.db, user_id).get::<Company>(id).await?;
    Ok(Json(company))
}

#[instrument(skip(state, body))]
pub async fn create_company(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<CreateCompany>,
) -> AppResult<(StatusCode, Json<Company>)> {
    body.validate()?;
    let company = Scoped::new(&state.db, user_id).insert(body).await?;
    info!(%user_id, company_id = %company.id, "company created");
    Ok((StatusCode::CREATED, Json(company)))
}

#[instrument(skip(state, body))]
pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateCompany>,
) -> AppResult<Json<Company>> {
    body.validate()?;
    let company = Scoped::new(&state.db, user_id).update(id, body).await?;
    Ok(Json(company))
}

#[instrument(skip(state))]
pub async fn delete_company(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    Scoped::new(&state.db, user_id).delete::<Company>(id).await?;
    info!(%user_id, company_id = %id, "company deleted");
    Ok(StatusCode::NO_CONTENT)
}
