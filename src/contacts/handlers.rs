use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ContactQuery, CreateContact, UpdateContact},
    repo::Contact,
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
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact)
                .put(update_contact)
                .patch(update_contact)
                .delete(delete_contact),
        )
}

#[instrument(skip(state))]
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(query): ApiQuery<ContactQuery>,
) -> AppResult<Json<Vec<Contact>>> {
    let contacts = Scoped::new(&state.db, user_id).list(&query).await?;
    Ok(Json(contacts))
}

#[instrument(skip(state))]
pub async fn get_contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Contact>> {
    let contact = Scoped::new(&state.db, user_id).get::<Contact>(id).await?;
    Ok(Json(contact))
}

#[instrument(skip(state, body))]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(body): ApiJson<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    body.validate()?;
    let scoped = Scoped::new(&state.db, user_id);
    if let Some(company_id) = body.company_id {
        scoped.require::<Company>("company_id", company_id).await?;
    }
    let contact = scoped.insert(body).await?;
    info!(%user_id, contact_id = %contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

#[instrument(skip(state, body))]
pub async fn update_contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateContact>,
) -> AppResult<Json<Contact>> {
    body.validate()?;
    let scoped = Scoped::new(&state.db, user_id);
    if let Some(company_id) = body.new_company() {
        scoped.require::<Company>("company_id", company_id).await?;
    }
    let contact = scoped.update(id, body).await?;
    Ok(Json(contact))
}

#[instrument(skip(state))]
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    Scoped::new(&state.db, user_id).delete::<Contact>(id).await?;
    info!(%user_id, contact_id = %id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
