use std::time::Duration;

use async_trait::async_trait;

use super::BookingDispatcher;
use crate::models::SubmissionRequest;

const BACKOFF_STEP: Duration = Duration::from_millis(500);

pub struct HttpBookingDispatcher {
    base_url: String,
    max_retries: u32,
    backoff_step: Duration,
    client: reqwest::Client,
}

impl HttpBookingDispatcher {
    pub fn new(base_url: String, max_retries: u32, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            backoff_step: BACKOFF_STEP,
            client,
        }
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    async fn attempt(&self, url: &str, request: &SubmissionRequest) -> Result<(), Attempt> {
        let resp = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Attempt::Retryable(anyhow::Error::new(e).context("failed to reach booking service")))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        let err = anyhow::anyhow!("booking service returned {status}: {body}");
        if status.is_server_error() {
            Err(Attempt::Retryable(err))
        } else {
            Err(Attempt::Fatal(err))
        }
    }
}

enum Attempt {
    Retryable(anyhow::Error),
    Fatal(anyhow::Error),
}

#[async_trait]
impl BookingDispatcher for HttpBookingDispatcher {
    /// Transport failures and 5xx responses are retried with linear backoff;
    /// 4xx responses fail at once.
    async fn dispatch(&self, request: &SubmissionRequest) -> anyhow::Result<()> {
        let url = format!("{}/bookings", self.base_url);
        let mut attempt = 0;

        loop {
            match self.attempt(&url, request).await {
                Ok(()) => return Ok(()),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retryable(e)) if attempt >= self.max_retries => return Err(e),
                Err(Attempt::Retryable(e)) => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "booking dispatch failed, retrying");
                    tokio::time::sleep(self.backoff_step * attempt).await;
                }
            }
        }
    }
}
