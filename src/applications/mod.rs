mod dto;
pub mod handlers;
pub mod repo;
pub mod status;

pub use dto::{ApplicationQuery, CreateApplication, UpdateApplication};
pub use repo::Application;
pub use status::ApplicationStatus;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
