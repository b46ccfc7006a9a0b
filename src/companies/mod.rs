mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{CompanyQuery, CreateCompany, UpdateCompany};
pub use repo::Company;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
