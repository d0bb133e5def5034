use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::api::mailer::{LeadMailer, MailerError};
use crate::models::lead_models::LeadNotification;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Resend HTTP API client (`POST /emails`).
pub struct ResendMailer {
    client: Client,
    api_key: String,
    api_url: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn new(api_key: String, api_url: String, from: String, to: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default reqwest client: {}", e);
                Client::new()
            });

        Self { client, api_key, api_url, from, to }
    }
}

#[async_trait]
impl LeadMailer for ResendMailer {
    async fn send(&self, notification: &LeadNotification) -> Result<(), MailerError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [&self.to],
            reply_to: &notification.reply_to,
            subject: &notification.subject,
            text: &notification.text,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("status {}: {}", status, e));
            tracing::error!("Resend rejected lead notification with status {}", status);
            return Err(MailerError(text));
        }

        tracing::debug!("Resend accepted lead notification");
        Ok(())
    }

    fn provider(&self) -> &'static str {
        "resend"
    }
}
