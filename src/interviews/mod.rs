mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{CreateInterview, InterviewQuery, UpdateInterview};
pub use repo::Interview;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
