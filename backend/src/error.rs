use axum::{
    Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::models::lead_models::Language;

/// Longest provider error text echoed back to the browser.
pub const PROVIDER_ERROR_LIMIT: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("Method not allowed.")]
    MethodNotAllowed,
    #[error("{0}")]
    Configuration(String),
    #[error("Invalid payload.")]
    InvalidPayload,
    #[error("{}", .0.missing_fields_message())]
    MissingFields(Language),
    #[error("{}", .0.business_email_message())]
    NotBusinessEmail(Language),
    #[error("{}", .0.business_mobile_message())]
    InvalidMobile(Language),
    #[error("Email provider error: {}", truncate_chars(.0, PROVIDER_ERROR_LIMIT))]
    Provider(String),
}

impl LeadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LeadError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            LeadError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LeadError::InvalidPayload
            | LeadError::MissingFields(_)
            | LeadError::NotBusinessEmail(_)
            | LeadError::InvalidMobile(_) => StatusCode::BAD_REQUEST,
            LeadError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        json_response(self.status_code(), json!({"message": self.to_string()}))
    }
}

/// JSON body with an explicit utf-8 charset, used for every intake response.
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json; charset=utf-8"),
    );
    response
}

/// Cuts `value` after `limit` characters without splitting a code point.
pub fn truncate_chars(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
