//! Webhook notification delivery.

use crate::extract::Promo;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Delivers a single message to an externally configured destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Discord-compatible webhook sink: POSTs `{"content": message}` as JSON.
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookNotifier {
    /// Create a notifier for the given webhook URL.
    pub fn new(webhook_url: String, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "content": message }))
            .send()
            .await
            .context("webhook request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("webhook returned {status}");
        }

        Ok(())
    }
}

/// Build the single message summarizing newly started happy hours.
pub fn format_message(novel: &[Promo]) -> String {
    let mut message = String::from("Happy hour started!");
    for item in novel {
        message.push('\n');
        message.push_str(&item.name);
        message.push_str(": ");
        message.push_str(&item.url);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(name: &str, url: &str) -> Promo {
        Promo {
            name: name.to_string(),
            url: url.to_string(),
            is_happy_hour: true,
        }
    }

    #[test]
    fn test_format_message_lists_each_item() {
        let message = format_message(&[
            promo("Bundle X", "https://shop.test/x"),
            promo("Bundle Y", "https://shop.test/y"),
        ]);

        assert_eq!(
            message,
            "Happy hour started!\nBundle X: https://shop.test/x\nBundle Y: https://shop.test/y"
        );
    }

    #[test]
    fn test_format_message_single_item() {
        let message = format_message(&[promo("Bundle X", "https://shop.test/x")]);
        assert!(message.starts_with("Happy hour started!"));
        assert!(message.contains("Bundle X"));
    }
}
