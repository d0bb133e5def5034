use std::env;

pub const DEFAULT_TO_EMAIL: &str = "andreas.stoeckl@506.ai";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Server email configuration missing. Set RESEND_API_KEY and LEAD_FROM_EMAIL.")]
    MissingResend,
    #[error("Server email configuration missing. Set SMTP_HOST, SMTP_USER, SMTP_PASS and LEAD_FROM_EMAIL.")]
    MissingSmtp,
    #[error("Server email configuration invalid. SMTP_PORT must be a port number, got '{0}'.")]
    InvalidSmtpPort(String),
    #[error("Server email configuration invalid. LEAD_EMAIL_PROVIDER must be 'resend' or 'smtp', got '{0}'.")]
    UnknownProvider(String),
    #[error("Server email configuration invalid. {0}")]
    InvalidAddress(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub secure: bool,
}

// keeps the password out of log lines
impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Resend { api_key: String, api_url: String },
    Smtp(SmtpSettings),
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Resend { api_url, .. } => {
                f.debug_struct("Resend").field("api_url", api_url).finish_non_exhaustive()
            }
            ProviderConfig::Smtp(settings) => std::fmt::Debug::fmt(settings, f),
        }
    }
}

/// Where lead notifications come from and go to, and how they are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadConfig {
    pub from_email: String,
    pub from_name: Option<String>,
    pub to_email: String,
    pub reply_to_override: Option<String>,
    pub provider: ProviderConfig,
}

impl LeadConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let provider_name = get("LEAD_EMAIL_PROVIDER")
            .map(|value| value.to_lowercase())
            .unwrap_or_else(|| "resend".to_string());
        let from_email = get("LEAD_FROM_EMAIL");

        let (provider, from_email) = match provider_name.as_str() {
            "resend" => {
                let (Some(api_key), Some(from_email)) = (get("RESEND_API_KEY"), from_email) else {
                    return Err(ConfigError::MissingResend);
                };
                let api_url = get("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string())
                    .trim_end_matches('/')
                    .to_string();
                (ProviderConfig::Resend { api_key, api_url }, from_email)
            }
            "smtp" => {
                let (Some(host), Some(user), Some(password), Some(from_email)) =
                    (get("SMTP_HOST"), get("SMTP_USER"), get("SMTP_PASS"), from_email)
                else {
                    return Err(ConfigError::MissingSmtp);
                };
                let secure = get("SMTP_SECURE")
                    .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
                    .unwrap_or(false);
                let port = match get("SMTP_PORT") {
                    Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidSmtpPort(raw))?,
                    None if secure => 465,
                    None => 587,
                };
                (
                    ProviderConfig::Smtp(SmtpSettings { host, port, user, password, secure }),
                    from_email,
                )
            }
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        Ok(LeadConfig {
            from_email,
            from_name: get("LEAD_FROM_NAME"),
            to_email: get("LEAD_TO_EMAIL").unwrap_or_else(|| DEFAULT_TO_EMAIL.to_string()),
            reply_to_override: get("LEAD_REPLY_TO"),
            provider,
        })
    }

    /// `Name <address>` when a display name is configured.
    pub fn from_header(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }
}

pub fn bind_addr() -> String {
    env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn resend_is_the_default_provider() {
        let config = LeadConfig::from_lookup(lookup(&[
            ("RESEND_API_KEY", "re_123"),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.provider,
            ProviderConfig::Resend {
                api_key: "re_123".to_string(),
                api_url: DEFAULT_RESEND_API_URL.to_string(),
            }
        );
        assert_eq!(config.to_email, DEFAULT_TO_EMAIL);
        assert_eq!(config.reply_to_override, None);
        assert_eq!(config.from_header(), "leads@506.ai");
    }

    #[test]
    fn missing_resend_key_names_required_variables() {
        let error = LeadConfig::from_lookup(lookup(&[("LEAD_FROM_EMAIL", "leads@506.ai")]))
            .expect_err("api key is missing");

        assert_eq!(error, ConfigError::MissingResend);
        assert_eq!(
            error.to_string(),
            "Server email configuration missing. Set RESEND_API_KEY and LEAD_FROM_EMAIL."
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let error = LeadConfig::from_lookup(lookup(&[
            ("RESEND_API_KEY", "   "),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
        ]))
        .expect_err("blank api key");
        assert_eq!(error, ConfigError::MissingResend);
    }

    #[test]
    fn overrides_are_applied() {
        let config = LeadConfig::from_lookup(lookup(&[
            ("RESEND_API_KEY", "re_123"),
            ("RESEND_API_URL", "http://localhost:9999/"),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
            ("LEAD_FROM_NAME", "Kollega Website"),
            ("LEAD_TO_EMAIL", "sales@506.ai"),
            ("LEAD_REPLY_TO", "noreply@506.ai"),
        ]))
        .expect("config should load");

        assert_eq!(config.to_email, "sales@506.ai");
        assert_eq!(config.reply_to_override.as_deref(), Some("noreply@506.ai"));
        assert_eq!(config.from_header(), "Kollega Website <leads@506.ai>");
        assert!(matches!(
            config.provider,
            ProviderConfig::Resend { ref api_url, .. } if api_url == "http://localhost:9999"
        ));
    }

    #[test]
    fn smtp_variant_requires_credentials() {
        let error = LeadConfig::from_lookup(lookup(&[
            ("LEAD_EMAIL_PROVIDER", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
        ]))
        .expect_err("smtp user and password missing");
        assert_eq!(error, ConfigError::MissingSmtp);
    }

    #[test]
    fn smtp_port_defaults_follow_secure_flag() {
        let base = [
            ("LEAD_EMAIL_PROVIDER", "SMTP"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "user"),
            ("SMTP_PASS", "secret"),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
        ];

        let plain = LeadConfig::from_lookup(lookup(&base)).expect("config should load");
        let ProviderConfig::Smtp(settings) = plain.provider else {
            panic!("expected smtp provider");
        };
        assert_eq!(settings.port, 587);
        assert!(!settings.secure);

        let mut secure_pairs = base.to_vec();
        secure_pairs.push(("SMTP_SECURE", "true"));
        let secure = LeadConfig::from_lookup(lookup(&secure_pairs)).expect("config should load");
        let ProviderConfig::Smtp(settings) = secure.provider else {
            panic!("expected smtp provider");
        };
        assert_eq!(settings.port, 465);
        assert!(settings.secure);
    }

    #[test]
    fn invalid_smtp_port_is_rejected() {
        let error = LeadConfig::from_lookup(lookup(&[
            ("LEAD_EMAIL_PROVIDER", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "user"),
            ("SMTP_PASS", "secret"),
            ("SMTP_PORT", "smtp"),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
        ]))
        .expect_err("port is not numeric");
        assert_eq!(error, ConfigError::InvalidSmtpPort("smtp".to_string()));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let error = LeadConfig::from_lookup(lookup(&[("LEAD_EMAIL_PROVIDER", "sendgrid")]))
            .expect_err("unknown provider");
        assert_eq!(error, ConfigError::UnknownProvider("sendgrid".to_string()));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = LeadConfig::from_lookup(lookup(&[
            ("LEAD_EMAIL_PROVIDER", "smtp"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "user"),
            ("SMTP_PASS", "hunter2"),
            ("LEAD_FROM_EMAIL", "leads@506.ai"),
        ]))
        .expect("config should load");

        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
