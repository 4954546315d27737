//! Plain-HTTP fetcher for `--no-browser` runs.
//!
//! No JavaScript execution: badges injected by client-side script will not
//! appear in the returned markup. Useful against mirrors or fixtures that
//! serve the listing pre-rendered.

use super::PageFetcher;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Fetcher that issues a single GET without rendering.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a standard Chrome user-agent.
    pub fn new(timeout_ms: u64) -> Self {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("GET {url} returned {status}");
        }

        resp.text().await.context("failed to read response body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_creation() {
        let fetcher = HttpFetcher::new(10000);
        let _ = fetcher;
    }
}
