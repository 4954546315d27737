//! One watch run: fetch → extract → detect → persist → notify.

use crate::error::{WatchError, WatchResult};
use crate::extract::{self, Promo};
use crate::fetcher::PageFetcher;
use crate::history::HistoryStore;
use crate::notify::{self, Notifier};
use crate::novelty;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Items extracted from the listing.
    pub total: usize,
    /// Items that are newly started happy hours.
    pub novel: usize,
    /// Whether a notification was actually delivered.
    pub notified: bool,
}

/// Execute one scrape/detect/persist/notify cycle.
///
/// Novelty is evaluated for every item before the batch append, so the
/// detector only ever sees history written by strictly prior runs. With
/// `dry_run` set, detection still happens but nothing is written and no
/// notification is sent.
///
/// A notification delivery failure is logged and swallowed: by that point
/// history is committed and the run has nothing left to lose.
pub async fn run_once(
    fetcher: &dyn PageFetcher,
    history: &mut HistoryStore,
    notifier: Option<&dyn Notifier>,
    base_url: &str,
    dry_run: bool,
) -> WatchResult<RunReport> {
    let html = fetcher.fetch(base_url).await.map_err(WatchError::Fetch)?;
    debug!(bytes = html.len(), url = base_url, "fetched listing page");

    let items = extract::extract(&html, base_url)?;
    info!(total = items.len(), "extracted listing snapshot");

    let mut novel: Vec<Promo> = Vec::new();
    for item in &items {
        if novelty::is_new_happy_hour(item, history)? {
            novel.push(item.clone());
        }
    }
    info!(novel = novel.len(), "novelty evaluated");

    if dry_run {
        for item in &novel {
            info!(name = %item.name, url = %item.url, "would notify");
        }
        return Ok(RunReport {
            total: items.len(),
            novel: novel.len(),
            notified: false,
        });
    }

    history.append_all(&items)?;

    let mut notified = false;
    if !novel.is_empty() {
        let message = notify::format_message(&novel);
        match notifier {
            Some(sink) => match sink.notify(&message).await {
                Ok(()) => notified = true,
                Err(e) => warn!("{}", WatchError::Notification(e)),
            },
            None => warn!("no webhook configured, skipping notification"),
        }
    }

    Ok(RunReport {
        total: items.len(),
        novel: novel.len(),
        notified,
    })
}
