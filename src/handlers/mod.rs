pub mod auth;
pub mod catalog;
pub mod health;
pub mod sessions;
pub mod tickets;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:id",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route("/api/sessions/:id/monument", post(sessions::select_monument))
        .route("/api/sessions/:id/date", post(sessions::select_date))
        .route("/api/sessions/:id/slot", post(sessions::select_slot))
        .route(
            "/api/sessions/:id/nationality",
            post(sessions::select_nationality),
        )
        .route(
            "/api/sessions/:id/fields/:field",
            delete(sessions::clear_field),
        )
        .route("/api/sessions/:id/submit", post(sessions::submit))
        .route("/api/tickets/verify", post(tickets::verify_ticket))
        .with_state(state)
}
