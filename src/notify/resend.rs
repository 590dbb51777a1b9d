// src/notify/resend.rs

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{Notifier, OpeningMessage};
use crate::config::EmailConfig;
use crate::error::{Result, WatchError};
use crate::extract::CourseRecord;

#[derive(Debug, Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Sends opening alerts through Resend's email API.
#[derive(Debug, Clone)]
pub struct ResendNotifier {
    client: Client,
    email: EmailConfig,
}

impl ResendNotifier {
    pub fn new(client: Client, email: EmailConfig) -> Self {
        ResendNotifier { client, email }
    }

    fn send_url(&self) -> String {
        format!("{}/emails", self.email.api_base.as_str().trim_end_matches('/'))
    }
}

impl Notifier for ResendNotifier {
    #[instrument(level = "info", skip_all, fields(crn = record.crn().unwrap_or_default()))]
    async fn notify(&self, record: &CourseRecord) -> Result<()> {
        let msg = OpeningMessage::for_record(record);
        let body = SendEmail {
            from: &self.email.from,
            to: [&self.email.to],
            subject: &msg.subject,
            html: &msg.html,
        };

        let url = self.send_url();
        let resp = self
            .client
            .post(url.as_str())
            .bearer_auth(&self.email.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| WatchError::Notification(format!("POST {}: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(WatchError::Notification(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let sent: SendResponse = resp
            .json()
            .await
            .map_err(|e| WatchError::Notification(format!("decoding provider reply: {}", e)))?;
        info!(id = %sent.id, to = %self.email.to, "email sent");
        Ok(())
    }
}
