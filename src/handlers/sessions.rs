use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{BookingSelection, Field, FormError, FormState, Ticket};
use crate::services::booking_form::{BookingFormController, TracingObserver};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionView {
    id: String,
    selection: BookingSelection,
    state: FormState,
    missing: Vec<Field>,
}

impl SessionView {
    fn new(id: &str, form: &BookingFormController) -> Self {
        Self {
            id: id.to_string(),
            selection: form.selection().clone(),
            state: form.state(),
            missing: form.missing_fields(),
        }
    }
}

#[derive(Deserialize)]
pub struct OptionChoice {
    pub value: String,
}

#[derive(Deserialize)]
pub struct DateChoice {
    pub date: NaiveDate,
}

/// Runs `op` against the session's form and returns the resulting view.
fn with_form<F>(state: &AppState, id: &str, op: F) -> Result<Json<SessionView>, AppError>
where
    F: FnOnce(&mut BookingFormController) -> Result<(), FormError>,
{
    let mut sessions = state.sessions();
    let form = sessions
        .touch(id, Utc::now())
        .ok_or_else(|| AppError::NotFound(format!("booking session {id}")))?;
    if let Err(e) = op(form) {
        tracing::info!(session = %id, error = %e, "selection rejected");
        return Err(e.into());
    }
    Ok(Json(SessionView::new(id, form)))
}

// POST /api/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let id = uuid::Uuid::new_v4().to_string();
    let mut form = state.new_form();
    form.subscribe(Box::new(TracingObserver {
        session_id: id.clone(),
    }));
    let view = SessionView::new(&id, &form);

    state
        .sessions()
        .insert(id.clone(), form, Utc::now())
        .map_err(|e| AppError::Busy(e.to_string()))?;
    tracing::info!(session = %id, "booking session started");

    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    with_form(&state, &id, |_| Ok(()))
}

// DELETE /api/sessions/:id
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    match state.sessions().remove(&id) {
        Some(_) => {
            tracing::info!(session = %id, "booking session ended");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(format!("booking session {id}"))),
    }
}

// POST /api/sessions/:id/monument
pub async fn select_monument(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(choice): Json<OptionChoice>,
) -> Result<Json<SessionView>, AppError> {
    with_form(&state, &id, |form| form.select_monument(&choice.value).map(drop))
}

// POST /api/sessions/:id/date
pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(choice): Json<DateChoice>,
) -> Result<Json<SessionView>, AppError> {
    with_form(&state, &id, |form| form.select_date(choice.date).map(drop))
}

// POST /api/sessions/:id/slot
pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(choice): Json<OptionChoice>,
) -> Result<Json<SessionView>, AppError> {
    with_form(&state, &id, |form| form.select_slot(&choice.value).map(drop))
}

// POST /api/sessions/:id/nationality
pub async fn select_nationality(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(choice): Json<OptionChoice>,
) -> Result<Json<SessionView>, AppError> {
    with_form(&state, &id, |form| form.select_nationality(&choice.value).map(drop))
}

// DELETE /api/sessions/:id/fields/:field
pub async fn clear_field(
    State(state): State<Arc<AppState>>,
    Path((id, field)): Path<(String, String)>,
) -> Result<Json<SessionView>, AppError> {
    let field = Field::parse(&field)
        .ok_or_else(|| AppError::Validation(format!("unknown field: {field}")))?;
    with_form(&state, &id, |form| {
        form.clear(field);
        Ok(())
    })
}

// POST /api/sessions/:id/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    // The lock is released before any network call.
    let request = {
        let mut sessions = state.sessions();
        let form = sessions
            .touch(&id, Utc::now())
            .ok_or_else(|| AppError::NotFound(format!("booking session {id}")))?;
        form.submit()?
    };

    let available = state
        .availability
        .is_available(&request)
        .await
        .map_err(|e| AppError::Upstream(format!("{e:#}")))?;
    if !available {
        return Err(AppError::Unavailable(format!(
            "{} is fully booked for the {} slot on {}",
            request.monument, request.slot, request.visit_date
        )));
    }

    state.dispatcher.dispatch(&request).await.map_err(|e| {
        tracing::error!(session = %id, error = %e, "booking dispatch failed");
        AppError::Upstream(format!("{e:#}"))
    })?;

    let ticket = state
        .tickets
        .issue(request)
        .map_err(|e| AppError::Config(format!("{e:#}")))?;

    tracing::info!(
        session = %id,
        ticket = %ticket.id,
        monument = %ticket.request.monument,
        visit_date = %ticket.request.visit_date,
        slot = %ticket.request.slot,
        "booking confirmed"
    );

    Ok((StatusCode::CREATED, Json(ticket)))
}
