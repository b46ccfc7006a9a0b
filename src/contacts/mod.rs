mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{ContactQuery, CreateContact, UpdateContact};
pub use repo::Contact;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
