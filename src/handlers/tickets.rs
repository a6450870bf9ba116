use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::SubmissionRequest;
use crate::services::ticket::parse_qr;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub qr_content: String,
    pub signature: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    valid: bool,
    booking: SubmissionRequest,
}

// POST /api/tickets/verify
pub async fn verify_ticket(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let booking = parse_qr(&payload.qr_content).map_err(|e| AppError::Validation(e.to_string()))?;
    let valid = state.tickets.verify(&payload.qr_content, &payload.signature);
    if !valid {
        tracing::warn!(monument = %booking.monument, "ticket signature mismatch");
    }
    Ok(Json(VerifyResponse { valid, booking }))
}
