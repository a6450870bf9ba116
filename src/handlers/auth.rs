use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{AuthSession, Login, Signup};
use crate::services::auth::AuthError;
use crate::state::AppState;

fn require(value: &str, name: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} is required")));
    }
    Ok(())
}

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<Login>,
) -> Result<Json<AuthSession>, AppError> {
    payload.email = payload.email.trim().to_string();
    require(&payload.email, "email")?;
    require(&payload.password, "password")?;

    match state.auth.login(&payload).await {
        Ok(session) => {
            tracing::info!(email = %session.email, "login succeeded");
            Ok(Json(session))
        }
        Err(AuthError::Rejected) => Err(AppError::Unauthorized),
        Err(AuthError::Transport(e)) => Err(AppError::Upstream(format!("{e:#}"))),
    }
}

// POST /api/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Signup>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let signup = payload.normalize();
    require(&signup.name, "name")?;
    require(&signup.email, "email")?;
    require(&signup.mobile, "mobile")?;
    require(&signup.password, "password")?;
    if !state.catalog.has_nationality(&signup.nationality) {
        return Err(AppError::Validation(format!(
            "{:?} is not a valid nationality",
            signup.nationality
        )));
    }

    state
        .auth
        .signup(&signup)
        .await
        .map_err(|e| AppError::Upstream(format!("{e:#}")))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Signup Successful, Please Login" })),
    ))
}
