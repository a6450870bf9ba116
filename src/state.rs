use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Context;

use crate::config::AppConfig;
use crate::models::Catalog;
use crate::services::auth::http::HttpAuthProvider;
use crate::services::auth::{AcceptAllAuthProvider, AuthProvider};
use crate::services::availability::{AlwaysAvailable, AvailabilityChecker};
use crate::services::booking_form::BookingFormController;
use crate::services::clock::{Clock, LocalClock};
use crate::services::dispatch::http::HttpBookingDispatcher;
use crate::services::dispatch::{BookingDispatcher, LocalDispatcher};
use crate::services::session_store::SessionStore;
use crate::services::ticket::TicketIssuer;

pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub clock: Arc<dyn Clock>,
    pub auth: Box<dyn AuthProvider>,
    pub availability: Box<dyn AvailabilityChecker>,
    pub dispatcher: Box<dyn BookingDispatcher>,
    pub tickets: TicketIssuer,
    pub sessions: Mutex<SessionStore>,
}

impl AppState {
    /// Wires the collaborators named by `config`. Empty service URLs fall back
    /// to the in-process implementations.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = load_catalog(&config.catalog_path)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let auth: Box<dyn AuthProvider> = if config.auth_api_url.is_empty() {
            tracing::warn!("AUTH_API_URL not set, logins are not verified");
            Box::new(AcceptAllAuthProvider)
        } else {
            tracing::info!("using auth service at {}", config.auth_api_url);
            Box::new(HttpAuthProvider::new(config.auth_api_url.clone(), client.clone()))
        };

        let dispatcher: Box<dyn BookingDispatcher> = if config.booking_api_url.is_empty() {
            tracing::info!("BOOKING_API_URL not set, bookings stay local");
            Box::new(LocalDispatcher)
        } else {
            tracing::info!("using booking service at {}", config.booking_api_url);
            Box::new(HttpBookingDispatcher::new(
                config.booking_api_url.clone(),
                config.booking_max_retries,
                client,
            ))
        };

        if config.ticket_secret == "changeme" {
            tracing::warn!("TICKET_SECRET is the default, ticket codes can be forged");
        }

        Ok(Self {
            tickets: TicketIssuer::new(config.ticket_secret.clone()),
            catalog: Arc::new(catalog),
            clock: Arc::new(LocalClock),
            auth,
            availability: Box::new(AlwaysAvailable),
            dispatcher,
            sessions: Mutex::new(SessionStore::new(
                chrono::Duration::minutes(config.session_idle_minutes),
                config.max_sessions,
            )),
        })
    }

    pub fn sessions(&self) -> MutexGuard<'_, SessionStore> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn new_form(&self) -> BookingFormController {
        BookingFormController::new(Arc::clone(&self.catalog), Arc::clone(&self.clock))
    }
}

fn load_catalog(path: &str) -> anyhow::Result<Catalog> {
    if path.is_empty() {
        return Ok(Catalog::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {path}"))?;
    let catalog =
        Catalog::from_json(&raw).with_context(|| format!("invalid catalog file: {path}"))?;
    tracing::info!(
        monuments = catalog.monuments.len(),
        slots = catalog.slots.len(),
        nationalities = catalog.nationalities.len(),
        "loaded catalog from {path}"
    );
    Ok(catalog)
}
