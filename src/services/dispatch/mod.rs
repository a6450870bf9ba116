pub mod http;

use async_trait::async_trait;

use crate::models::SubmissionRequest;

/// Hands a submission to whatever records bookings.
#[async_trait]
pub trait BookingDispatcher: Send + Sync {
    async fn dispatch(&self, request: &SubmissionRequest) -> anyhow::Result<()>;
}

/// Used when no booking service is configured; nothing leaves the process.
pub struct LocalDispatcher;

#[async_trait]
impl BookingDispatcher for LocalDispatcher {
    async fn dispatch(&self, request: &SubmissionRequest) -> anyhow::Result<()> {
        tracing::info!(
            monument = %request.monument,
            visit_date = %request.visit_date,
            slot = %request.slot,
            "booking recorded locally"
        );
        Ok(())
    }
}
