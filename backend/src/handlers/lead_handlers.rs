use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
};
use chrono::Utc;

use crate::AppState;
use crate::api::mailer::LeadMailer;
use crate::error::{json_response, LeadError};
use crate::models::lead_models::{LeadAccepted, LeadNotification, LeadSubmission};
use crate::utils::validation::email_domain;

/// Everything a submission needs once the email configuration is known to be
/// complete.
#[derive(Clone)]
pub struct LeadIntake {
    pub mailer: Arc<dyn LeadMailer>,
    pub reply_to_override: Option<String>,
}

#[tracing::instrument(name = "lead", skip_all, fields(lead_id = %uuid::Uuid::new_v4()))]
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, LeadError> {
    let intake = match &state.intake {
        Ok(intake) => intake,
        Err(e) => {
            tracing::error!("Rejecting lead, email configuration incomplete: {}", e);
            return Err(LeadError::Configuration(e.to_string()));
        }
    };

    let lead = LeadSubmission::from_json(&body)
        .inspect_err(|_| tracing::info!("Rejecting lead with malformed JSON body"))?
        .validate()
        .inspect_err(|e| tracing::info!("Lead failed validation: {:?}", e))?;

    let notification = LeadNotification::compose(&lead, Utc::now(), intake.reply_to_override.as_deref());

    if let Err(e) = intake.mailer.send(&notification).await {
        tracing::error!("Failed to send lead notification: {}", e);
        return Err(LeadError::Provider(e.0));
    }

    tracing::info!(
        "Lead for {} forwarded (domain {}, language {})",
        lead.interesse,
        email_domain(&lead.business_email),
        lead.language.code()
    );
    Ok(json_response(StatusCode::OK, LeadAccepted { ok: true }))
}

pub async fn method_not_allowed() -> LeadError {
    LeadError::MethodNotAllowed
}
