use async_trait::async_trait;
use kernel::gateway::mail::Mailer;
use kernel::model::mail::OutgoingEmail;
use reqwest::Client;
use shared::config::MailConfig;
use shared::error::{AppError, AppResult};

/// Relay for the transactional mail API used by the booking form.
pub struct MailerImpl {
    client: Client,
    config: MailConfig,
}

impl MailerImpl {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for MailerImpl {
    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        let mut payload = serde_json::json!({
            "from": self.config.sender,
            "to": email.to,
            "subject": email.subject,
            "text": email.text,
        });
        if let Some(reply_to) = &email.reply_to {
            payload["reply_to"] = serde_json::Value::String(reply_to.clone());
        }

        let res = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail relay unreachable: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(%status, body, "mail relay rejected the message");
            return Err(AppError::ExternalServiceError(format!(
                "mail relay returned {status}"
            )));
        }

        Ok(())
    }
}
