#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    pub fn business_email(&self) -> &'static str {
        match self {
            Language::En => "Please use your company business email address.",
            Language::De => "Bitte eine Business-E-Mail-Adresse verwenden.",
        }
    }

    pub fn sending(&self) -> &'static str {
        match self {
            Language::En => "Sending...",
            Language::De => "Wird gesendet...",
        }
    }

    pub fn success(&self) -> &'static str {
        match self {
            Language::En => "Thank you! We will get back to you shortly.",
            Language::De => "Danke! Wir melden uns in Kuerze.",
        }
    }

    pub fn failure(&self) -> &'static str {
        match self {
            Language::En => "Sending failed. Please try again later.",
            Language::De => "Senden fehlgeschlagen. Bitte spaeter erneut versuchen.",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Language::En => "Request demo",
            Language::De => "Demo anfragen",
        }
    }
}

/// What the status line under the form currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Sending,
    Sent,
    Failed(String),
}

impl FormStatus {
    pub fn text(&self, language: Language) -> String {
        match self {
            FormStatus::Idle => String::new(),
            FormStatus::Sending => language.sending().to_string(),
            FormStatus::Sent => language.success().to_string(),
            FormStatus::Failed(message) => message.clone(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FormStatus::Idle | FormStatus::Sending => "form-status",
            FormStatus::Sent => "form-status success",
            FormStatus::Failed(_) => "form-status error",
        }
    }
}
