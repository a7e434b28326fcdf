use async_trait::async_trait;
use log::{info, warn};
use serde::Serialize;

use crate::error::PublishError;

#[derive(Debug, PartialEq, Eq)]
pub enum NotifyOutcome {
    Posted,
    /// Nothing configured, the message went to the log instead
    Skipped,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn post(&self, message: &str) -> Result<NotifyOutcome, PublishError>;
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

pub struct DiscordWebhook {
    http: reqwest::Client,
    url: Option<String>,
}

impl DiscordWebhook {
    pub fn new(http: reqwest::Client, url: Option<String>) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn post(&self, message: &str) -> Result<NotifyOutcome, PublishError> {
        let Some(url) = &self.url else {
            warn!("Discord webhook not configured, printing message instead:\n{message}");
            return Ok(NotifyOutcome::Skipped);
        };
        let resp = self
            .http
            .post(url)
            .json(&WebhookMessage { content: message })
            .send()
            .await
            .map_err(PublishError::Discord)?;
        let status = resp.status().as_u16();
        if matches!(status, 200 | 204) {
            info!("Posted to Discord");
            Ok(NotifyOutcome::Posted)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(PublishError::DiscordStatus { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_webhook_is_skipped() {
        let webhook = DiscordWebhook::new(reqwest::Client::new(), None);
        assert_eq!(webhook.post("hello").await.unwrap(), NotifyOutcome::Skipped);
    }

    #[test]
    fn webhook_payload() {
        let json = serde_json::to_string(&WebhookMessage { content: "## 🥏" }).unwrap();
        assert_eq!(json, r###"{"content":"## 🥏"}"###);
    }
}
