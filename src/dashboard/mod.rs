mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{fill_status_counts, upcoming_window, DashboardStats};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
