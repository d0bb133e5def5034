use std::sync::Arc;

use async_trait::async_trait;

use crate::api::resend::ResendMailer;
use crate::api::smtp::SmtpMailer;
use crate::config::lead_config::{ConfigError, LeadConfig, ProviderConfig};
use crate::models::lead_models::LeadNotification;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MailerError(pub String);

/// Delivers a lead notification to the sales inbox. One call is one attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadMailer: Send + Sync {
    async fn send(&self, notification: &LeadNotification) -> Result<(), MailerError>;

    fn provider(&self) -> &'static str;
}

pub fn build_mailer(config: &LeadConfig) -> Result<Arc<dyn LeadMailer>, ConfigError> {
    match &config.provider {
        ProviderConfig::Resend { api_key, api_url } => Ok(Arc::new(ResendMailer::new(
            api_key.clone(),
            api_url.clone(),
            config.from_header(),
            config.to_email.clone(),
        ))),
        ProviderConfig::Smtp(settings) => Ok(Arc::new(SmtpMailer::new(
            settings,
            &config.from_header(),
            &config.to_email,
        )?)),
    }
}
