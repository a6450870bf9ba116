use async_trait::async_trait;

use crate::models::SubmissionRequest;

#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    async fn is_available(&self, request: &SubmissionRequest) -> anyhow::Result<bool>;
}

/// No capacity data exists yet, so every slot is open.
pub struct AlwaysAvailable;

#[async_trait]
impl AvailabilityChecker for AlwaysAvailable {
    async fn is_available(&self, _request: &SubmissionRequest) -> anyhow::Result<bool> {
        Ok(true)
    }
}
