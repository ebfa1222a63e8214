pub mod client;
pub mod dto;
pub mod handlers;
pub mod parser;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::analysis_routes()
}
