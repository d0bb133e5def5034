use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::LeadError;
use crate::utils::validation::{is_business_email, is_business_mobile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    /// Anything other than `"en"` falls back to German.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("en") => Language::En,
            _ => Language::De,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    pub fn missing_fields_message(&self) -> &'static str {
        match self {
            Language::En => "Please complete all required fields.",
            Language::De => "Bitte alle Pflichtfelder ausfuellen.",
        }
    }

    pub fn business_email_message(&self) -> &'static str {
        match self {
            Language::En => "Please use your company business email address.",
            Language::De => "Bitte eine Business-E-Mail-Adresse verwenden.",
        }
    }

    pub fn business_mobile_message(&self) -> &'static str {
        match self {
            Language::En => "Please enter a valid business mobile number.",
            Language::De => "Bitte eine gueltige Business-Mobilnummer eingeben.",
        }
    }
}

/// Raw form submission after lenient coercion and trimming.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadSubmission {
    pub interesse: String,
    pub business_email: String,
    pub business_mobile: String,
    pub unternehmen: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLead {
    pub interesse: String,
    pub business_email: String,
    pub business_mobile: String,
    pub unternehmen: Option<String>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadNotification {
    pub subject: String,
    pub text: String,
    pub reply_to: String,
}

#[derive(Debug, Serialize)]
pub struct LeadAccepted {
    pub ok: bool,
}

impl LeadSubmission {
    /// Parses a request body. An empty body counts as `{}` and a JSON value
    /// that is not an object has no fields.
    pub fn from_json(body: &[u8]) -> Result<Self, LeadError> {
        let payload: Value = if body.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(body).map_err(|_| LeadError::InvalidPayload)?
        };

        let field = |name: &str| coerce_field(payload.get(name));

        Ok(LeadSubmission {
            interesse: field("interesse"),
            business_email: field("business_email"),
            business_mobile: field("business_mobile"),
            unternehmen: field("unternehmen"),
            language: Language::from_wire(payload.get("language").and_then(Value::as_str)),
        })
    }

    pub fn validate(self) -> Result<ValidatedLead, LeadError> {
        let language = self.language;

        if self.interesse.is_empty() || self.business_email.is_empty() || self.business_mobile.is_empty() {
            return Err(LeadError::MissingFields(language));
        }
        if !is_business_email(&self.business_email) {
            return Err(LeadError::NotBusinessEmail(language));
        }
        if !is_business_mobile(&self.business_mobile) {
            return Err(LeadError::InvalidMobile(language));
        }

        Ok(ValidatedLead {
            interesse: self.interesse,
            business_email: self.business_email,
            business_mobile: self.business_mobile,
            unternehmen: Some(self.unternehmen).filter(|value| !value.is_empty()),
            language,
        })
    }
}

// Falsy values (null, false, 0, "" and missing keys) are empty. Everything
// else is rendered the way a browser would stringify it, then trimmed.
fn coerce_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => String::new(),
        Some(other) => display_text(other).trim().to_string(),
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// 1.0 prints as "1", like integers
fn number_text(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            if float.fract() == 0.0 && float.abs() < 1e21 {
                return format!("{:.0}", float);
            }
            return float.to_string();
        }
    }
    number.to_string()
}

impl LeadNotification {
    pub fn compose(lead: &ValidatedLead, received_at: DateTime<Utc>, reply_to_override: Option<&str>) -> Self {
        let subject = format!("Kollega Demo Anfrage - {}", lead.interesse);
        let text = [
            "Neue Demo-Anfrage".to_string(),
            String::new(),
            format!("Kollega: {}", lead.interesse),
            format!("Business-E-Mail: {}", lead.business_email),
            format!("Business-Mobilnummer: {}", lead.business_mobile),
            format!("Unternehmen: {}", lead.unternehmen.as_deref().unwrap_or("-")),
            format!("Sprache: {}", lead.language.code().to_uppercase()),
            format!(
                "Zeitpunkt (UTC): {}",
                received_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        ]
        .join("\n");

        LeadNotification {
            subject,
            text,
            reply_to: reply_to_override
                .map(str::to_string)
                .unwrap_or_else(|| lead.business_email.clone()),
        }
    }
}
