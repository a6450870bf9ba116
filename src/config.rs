use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub auth_api_url: String,
    pub booking_api_url: String,
    pub ticket_secret: String,
    pub http_timeout_secs: u64,
    pub booking_max_retries: u32,
    pub catalog_path: String,
    pub session_idle_minutes: i64,
    pub max_sessions: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            auth_api_url: env::var("AUTH_API_URL").unwrap_or_default(),
            booking_api_url: env::var("BOOKING_API_URL").unwrap_or_default(),
            ticket_secret: env::var("TICKET_SECRET").unwrap_or_else(|_| "changeme".to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            booking_max_retries: env::var("BOOKING_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            catalog_path: env::var("CATALOG_PATH").unwrap_or_default(),
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            max_sessions: env::var("MAX_SESSIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }
}
