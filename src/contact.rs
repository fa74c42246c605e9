//! Contact-form relay — fire-and-forget submission to a third-party forms
//! endpoint.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::config::ContactConfig;
use crate::error::RelayError;

/// A contact-form submission from the marketing site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
}

/// Relays submissions to the configured forms endpoint with the access key
/// attached. Single attempt, no retries.
pub struct ContactRelay {
    client: reqwest::Client,
    config: ContactConfig,
}

impl ContactRelay {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Forward one submission. Returns the endpoint's success flag.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<bool, RelayError> {
        let body = json!({
            "access_key": self.config.access_key.expose_secret(),
            "name": submission.name,
            "email": submission.email,
            "company": submission.company,
            "message": submission.message,
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RelayError::Status {
                status: response.status().as_u16(),
            });
        }

        let parsed: RelayResponse = response
            .json()
            .await
            .map_err(|e| RelayError::RequestFailed(format!("invalid response body: {e}")))?;

        info!(success = parsed.success, "Contact form relayed");
        Ok(parsed.success)
    }
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: bool,
}
