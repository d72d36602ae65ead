//! Web layer: axum routes, DTOs and shared state.

mod dto;
mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::AppState;
