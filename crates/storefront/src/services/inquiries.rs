//! Connect form delivery.
//!
//! When `INQUIRY_WEBHOOK_URL` is configured, each validated [`Inquiry`] is
//! posted there as JSON. Without a webhook the inquiry is written to the log
//! so nothing is silently dropped in development.

use std::time::Duration;

use oakline_core::Inquiry;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

/// Webhook request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when delivering an inquiry.
#[derive(Debug, Error)]
pub enum InquiryDeliveryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook answered with a non-success status.
    #[error("webhook rejected inquiry with status {status}")]
    Rejected { status: u16 },
}

/// Where an inquiry ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the webhook.
    Webhook,
    /// No webhook configured; written to the log only.
    Logged,
}

/// JSON body posted to the webhook.
#[derive(Debug, Serialize)]
struct InquiryPayload<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    project: &'static str,
    project_label: &'static str,
    message: &'a str,
    source: &'static str,
    submitted_at: String,
}

impl<'a> From<&'a Inquiry> for InquiryPayload<'a> {
    fn from(inquiry: &'a Inquiry) -> Self {
        Self {
            name: &inquiry.name,
            email: &inquiry.email,
            phone: inquiry.phone.as_deref(),
            project: inquiry.project.slug(),
            project_label: inquiry.project.label(),
            message: &inquiry.message,
            source: "Website - Connect",
            submitted_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Sends connect form submissions to the studio.
#[derive(Clone)]
pub struct InquiryNotifier {
    client: reqwest::Client,
    webhook_url: Option<SecretString>,
}

impl InquiryNotifier {
    /// Create a notifier. `None` means log-only delivery.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(webhook_url: Option<SecretString>) -> Result<Self, InquiryDeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Whether submissions leave the process.
    #[must_use]
    pub const fn has_webhook(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Deliver an inquiry.
    ///
    /// # Errors
    ///
    /// Returns error if the webhook request fails or is rejected.
    pub async fn deliver(&self, inquiry: &Inquiry) -> Result<Delivery, InquiryDeliveryError> {
        let Some(url) = self.webhook_url.as_ref() else {
            tracing::info!(
                email = %inquiry.email,
                project = inquiry.project.slug(),
                message_length = inquiry.message.len(),
                "Inquiry received (no webhook configured)"
            );
            return Ok(Delivery::Logged);
        };

        let response = self
            .client
            .post(url.expose_secret())
            .json(&InquiryPayload::from(inquiry))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(InquiryDeliveryError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(
            email = %inquiry.email,
            project = inquiry.project.slug(),
            "Inquiry delivered to webhook"
        );
        Ok(Delivery::Webhook)
    }
}
