//! Client for the delivery endpoint.

use anyhow::{Context, Result};
use award_core::{Config, DeliveryResponse, Submission, DELIVERY_FAILED_MESSAGE};
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Delivery request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Delivery rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl DeliveryError {
    /// Message suitable for showing to the person who submitted
    pub fn user_message(&self) -> String {
        match self {
            DeliveryError::Transport(e) => e.to_string(),
            DeliveryError::Rejected { message, .. } => message.clone(),
        }
    }
}

/// Posts finished submissions to the delivery endpoint. Never retries.
#[derive(Clone, Debug)]
pub struct DeliveryClient {
    client: Client,
    url: String,
}

impl DeliveryClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Client for `AWARD_DELIVERY_URL` with `DELIVERY_TIMEOUT_SECS`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.delivery_url(),
            Duration::from_secs(config.delivery_timeout_secs()),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one submission.
    ///
    /// A non-2xx status or a body with `ok: false` is a failure carrying the
    /// server's message.
    #[tracing::instrument(skip(self, submission), fields(receipt_number = %submission.receipt_number()))]
    pub async fn deliver(&self, submission: &Submission) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.url).json(submission).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let parsed: Option<DeliveryResponse> = serde_json::from_slice(&body).ok();

        match parsed {
            Some(reply) if status.is_success() && reply.ok => {
                tracing::info!(status = status.as_u16(), "Submission delivered");
                Ok(())
            }
            other => {
                let message = other
                    .map(|reply| reply.failure_message().to_string())
                    .unwrap_or_else(|| DELIVERY_FAILED_MESSAGE.to_string());
                tracing::warn!(status = status.as_u16(), message = %message, "Delivery rejected");
                Err(DeliveryError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
