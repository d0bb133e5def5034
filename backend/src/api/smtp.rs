use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::api::mailer::{LeadMailer, MailerError};
use crate::config::lead_config::{ConfigError, SmtpSettings};
use crate::models::lead_models::LeadNotification;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// `secure` selects implicit TLS. Otherwise STARTTLS is used when the
    /// relay offers it and the session stays plain when it does not.
    pub fn new(settings: &SmtpSettings, from: &str, to: &str) -> Result<Self, ConfigError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| ConfigError::InvalidAddress(format!("LEAD_FROM_EMAIL: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| ConfigError::InvalidAddress(format!("LEAD_TO_EMAIL: {}", e)))?;

        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .map_err(|e| ConfigError::InvalidAddress(format!("SMTP_HOST: {}", e)))?
        } else {
            let tls = TlsParameters::new(settings.host.clone())
                .map_err(|e| ConfigError::InvalidAddress(format!("SMTP_HOST: {}", e)))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user.clone(), settings.password.clone()))
            .build();

        Ok(Self { transport, from, to })
    }

    pub fn build_message(&self, notification: &LeadNotification) -> Result<Message, MailerError> {
        let reply_to: Mailbox = notification
            .reply_to
            .parse()
            .map_err(|e| MailerError(format!("Invalid reply-to address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .reply_to(reply_to)
            .to(self.to.clone())
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.text.clone())
            .map_err(|e| MailerError(format!("Error building message: {}", e)))
    }
}

#[async_trait]
impl LeadMailer for SmtpMailer {
    async fn send(&self, notification: &LeadNotification) -> Result<(), MailerError> {
        let message = self.build_message(notification)?;
        self.transport.send(message).await.map_err(|e| {
            tracing::error!("SMTP delivery of lead notification failed: {}", e);
            MailerError(e.to_string())
        })?;
        Ok(())
    }

    fn provider(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: "user".to_string(),
            password: "secret".to_string(),
            secure: false,
        }
    }

    fn notification(reply_to: &str) -> LeadNotification {
        LeadNotification {
            subject: "Kollega Demo Anfrage - HR Kollega".to_string(),
            text: "Neue Demo-Anfrage\n\nKollega: HR Kollega".to_string(),
            reply_to: reply_to.to_string(),
        }
    }

    #[tokio::test]
    async fn message_carries_reply_to_and_plain_text_body() {
        let mailer = SmtpMailer::new(&settings(), "Kollega Website <leads@506.ai>", "sales@506.ai")
            .expect("mailer should build");
        let message = mailer
            .build_message(&notification("jane@acme.com"))
            .expect("message should build");

        let raw = String::from_utf8(message.formatted()).expect("message is utf-8");
        assert!(raw.contains("Reply-To: jane@acme.com"));
        assert!(raw.contains("To: sales@506.ai"));
        assert!(raw.contains("Subject: Kollega Demo Anfrage - HR Kollega"));
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(raw.contains("Kollega: HR Kollega"));
    }

    #[tokio::test]
    async fn invalid_reply_to_is_a_mailer_error() {
        let mailer = SmtpMailer::new(&settings(), "leads@506.ai", "sales@506.ai")
            .expect("mailer should build");
        let error = mailer
            .build_message(&notification("not-an-address"))
            .expect_err("reply-to cannot be parsed");
        assert!(error.0.starts_with("Invalid reply-to address"));
    }

    // Relay without STARTTLS: accepts AUTH and hands back the DATA section.
    async fn plain_relay() -> (u16, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (delivered, received) = oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            let mut delivered = Some(delivered);
            let mut data: Option<String> = None;

            write.write_all(b"220 localhost ESMTP\r\n").await.unwrap();
            while let Ok(Some(line)) = lines.next_line().await {
                if let Some(body) = data.as_mut() {
                    if line == "." {
                        if let Some(sender) = delivered.take() {
                            let _ = sender.send(data.take().unwrap_or_default());
                        }
                        data = None;
                        write.write_all(b"250 queued\r\n").await.unwrap();
                    } else {
                        body.push_str(&line);
                        body.push('\n');
                    }
                    continue;
                }

                let verb = line.get(..4).unwrap_or("").to_ascii_uppercase();
                let reply = match verb.as_str() {
                    "EHLO" => "250-localhost\r\n250 AUTH PLAIN LOGIN\r\n",
                    "AUTH" => "235 2.7.0 Authenticated\r\n",
                    "DATA" => {
                        data = Some(String::new());
                        "354 go ahead\r\n"
                    }
                    "QUIT" => "221 bye\r\n",
                    _ => "250 OK\r\n",
                };
                write.write_all(reply.as_bytes()).await.unwrap();
            }
        });

        (port, received)
    }

    #[tokio::test]
    async fn delivers_through_relay_without_starttls() {
        let (port, received) = plain_relay().await;
        let mailer = SmtpMailer::new(
            &SmtpSettings {
                host: "127.0.0.1".to_string(),
                port,
                ..settings()
            },
            "leads@506.ai",
            "sales@506.ai",
        )
        .expect("mailer should build");

        mailer
            .send(&notification("jane@acme.com"))
            .await
            .expect("plain relay accepts the lead");

        let data = received.await.expect("relay saw the message");
        assert!(data.contains("Subject: Kollega Demo Anfrage - HR Kollega"));
        assert!(data.contains("Reply-To: jane@acme.com"));
    }

    #[test]
    fn invalid_to_address_is_a_config_error() {
        let error = SmtpMailer::new(&settings(), "leads@506.ai", "nobody")
            .err()
            .expect("to address is invalid");
        assert!(matches!(error, ConfigError::InvalidAddress(message) if message.starts_with("LEAD_TO_EMAIL")));
    }
}
