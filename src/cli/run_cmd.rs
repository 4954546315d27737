//! `hhwatch run` — one scrape/detect/persist/notify cycle.

use crate::config::Config;
use crate::fetcher::chromium::ChromiumFetcher;
use crate::fetcher::http::HttpFetcher;
use crate::fetcher::PageFetcher;
use crate::history::HistoryStore;
use crate::notify::{Notifier, WebhookNotifier};
use crate::run;
use anyhow::Result;
use tracing::warn;

/// Run the run command.
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    let mut history = HistoryStore::open(&config.db_path)?;

    let fetcher: Box<dyn PageFetcher> = if config.no_browser {
        warn!("browser disabled: script-injected badges may be missed");
        Box::new(HttpFetcher::new(config.timeout_ms))
    } else {
        Box::new(ChromiumFetcher::new(config.timeout_ms).await?)
    };

    let notifier: Option<WebhookNotifier> = config
        .webhook_url
        .clone()
        .map(|url| WebhookNotifier::new(url, config.timeout_ms));

    let report = run::run_once(
        fetcher.as_ref(),
        &mut history,
        notifier.as_ref().map(|n| n as &dyn Notifier),
        &config.base_url,
        dry_run,
    )
    .await?;

    eprintln!("Total: {}", report.total);
    eprintln!("New HH bundle: {}", report.novel);

    Ok(())
}
