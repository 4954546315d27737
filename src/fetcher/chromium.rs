//! Chromium-based page fetcher using chromiumoxide.

use super::PageFetcher;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. HHWATCH_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("HHWATCH_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Headless-browser fetcher. One browser instance, one page per fetch.
pub struct ChromiumFetcher {
    browser: Browser,
    timeout_ms: u64,
}

impl ChromiumFetcher {
    /// Launch a headless Chromium instance.
    pub async fn new(timeout_ms: u64) -> Result<Self> {
        let chrome_path = find_chromium().context(
            "Chromium not found. Install Chrome/Chromium or set HHWATCH_CHROMIUM_PATH.",
        )?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Drain CDP events for the browser's lifetime.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            timeout_ms,
        })
    }
}

#[async_trait]
impl PageFetcher for ChromiumFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        let nav = tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            page.goto(url),
        )
        .await;

        match nav {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {}ms", self.timeout_ms),
        }

        // Let in-flight script finish injecting badges.
        let _ = page.wait_for_navigation().await;

        let result = page
            .evaluate("document.documentElement.outerHTML")
            .await
            .context("failed to read rendered markup")?;

        let html: String = result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert markup result: {e:?}"))?;

        let _ = page.close().await;

        Ok(html)
    }
}
