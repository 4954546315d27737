//! Page fetcher abstraction.
//!
//! The listing page's happy-hour badges are injected by client-side
//! script, so the default fetcher drives a headless browser. The trait is
//! the seam the orchestrator and the tests depend on.

pub mod chromium;
pub mod http;

use anyhow::Result;
use async_trait::async_trait;

/// Fetches the fully rendered markup of a single page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the page markup.
    async fn fetch(&self, url: &str) -> Result<String>;
}
