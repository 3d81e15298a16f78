//! Axum router configuration.
//!
//! Every endpoint except `/health` runs through the request executor.

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::api::auth::{get_user, login_social, refresh_token, update_user};
use super::api::contents::{create_content, get_content, get_template, list_contents, update_content};
use super::api::payments::{create_payment, get_payment, list_payments, update_payment};
use super::state::AppState;

/// Versioned API routes.
///
/// # Routes
///
/// ## Identity
/// - `POST /login/social` - Exchange an identity assertion for a session token
/// - `POST /token/refresh` - Re-issue the caller's token with a fresh expiry
/// - `GET /users/:id` - Fetch a user
/// - `PUT /users/:id` - Edit one's own profile
///
/// ## Payments
/// - `POST /payments`, `GET /payments`
/// - `GET /payments/:id`, `PUT /payments/:id`
///
/// ## Content
/// - `POST /contents`, `GET /contents`
/// - `GET /contents/:id`, `PUT /contents/:id`
/// - `GET /templates/:id`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login/social", post(login_social))
        .route("/token/refresh", post(refresh_token))
        .route("/users/:id", get(get_user).put(update_user))
        .route("/payments", post(create_payment).get(list_payments))
        .route("/payments/:id", get(get_payment).put(update_payment))
        .route("/contents", post(create_content).get(list_contents))
        .route("/contents/:id", get(get_content).put(update_content))
        .route("/templates/:id", get(get_template))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Complete application router with state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/v1", api_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
