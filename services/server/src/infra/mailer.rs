use std::time::Duration;

use serde::Serialize;

use crate::domain::repository::Mailer;
use crate::error::ChemtrackError;

/// Send timeout for the mail API. A hung relay must surface as a failure,
/// not block the reset flow.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Mail transport backed by an HTTP mail API.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct MailPayload {
    from: String,
    to: String,
    subject: String,
    text: String,
}

impl Mailer for HttpMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), ChemtrackError> {
        let payload = MailPayload {
            from: self.from.clone(),
            to: to.to_owned(),
            subject: "Your OTP for Password Reset".to_owned(),
            text: format!("Your OTP is: {code}. It will expire in 5 minutes."),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(SEND_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChemtrackError::MailDelivery(e.into()))?;

        if !response.status().is_success() {
            return Err(ChemtrackError::MailDelivery(anyhow::anyhow!(
                "mail api returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
