//! HTTP adapter - axum routes over the application services.

pub mod api;
pub mod context;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
