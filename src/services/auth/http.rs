use anyhow::Context;
use async_trait::async_trait;

use super::{AuthError, AuthProvider};
use crate::models::{AuthSession, Login, Signup};

/// Talks to the account service. Credentials go in a form-encoded POST body,
/// never in the URL.
pub struct HttpAuthProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAuthProvider {
    pub fn new(base_url: String, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn login(&self, login: &Login) -> Result<AuthSession, AuthError> {
        let url = format!("{}/login", self.base_url);

        let resp = self
            .client
            .post(&url)
            .form(&[("email", &login.email), ("password", &login.password)])
            .send()
            .await
            .context("failed to reach auth service")?;

        let status = resp.status();
        if status.is_client_error() {
            tracing::info!(email = %login.email, status = %status, "login rejected");
            return Err(AuthError::Rejected);
        }
        if !status.is_success() {
            return Err(AuthError::Transport(anyhow::anyhow!(
                "auth service returned {status}"
            )));
        }

        let token = resp
            .text()
            .await
            .context("failed to read login response")?
            .trim()
            .to_string();

        Ok(AuthSession {
            email: login.email.clone(),
            token: (!token.is_empty()).then_some(token),
        })
    }

    async fn signup(&self, signup: &Signup) -> anyhow::Result<()> {
        let url = format!("{}/signup", self.base_url);

        let resp = self
            .client
            .post(&url)
            .form(&[
                ("name", &signup.name),
                ("email", &signup.email),
                ("mobile", &signup.mobile),
                ("password", &signup.password),
                ("nationality", &signup.nationality),
            ])
            .send()
            .await
            .context("failed to reach auth service")?
            .error_for_status()
            .context("auth service returned error")?;

        tracing::info!(email = %signup.email, status = %resp.status(), "signup accepted");
        Ok(())
    }
}
