//! Parse the promotional listing markup into item records.
//!
//! Selector-based parsing of raw HTML via the `scraper` crate; no DOM
//! rendering happens here. The fetcher is responsible for handing over
//! fully rendered markup, since the happy-hour badges are injected by
//! client-side script.

use crate::error::{WatchError, WatchResult};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// One promotional item as currently shown on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promo {
    /// Display title of the bundle/deal.
    pub name: String,
    /// Absolute URL of the deal page.
    pub url: String,
    /// Whether the page marks this item as an active happy-hour discount.
    pub is_happy_hour: bool,
}

/// Alternate-text that marks the happy-hour badge, compared case-insensitively.
const BADGE_ALT: &str = "happy hour";

/// Extract all promotional items from the listing markup, in document order.
///
/// A missing or empty title is a structural failure and aborts extraction;
/// a missing badge is not — the item is simply not on happy hour. The same
/// title may legitimately appear twice; no deduplication happens here.
pub fn extract(html: &str, base_url: &str) -> WatchResult<Vec<Promo>> {
    let base = Url::parse(base_url)
        .map_err(|e| WatchError::Extraction(format!("invalid base url '{base_url}': {e}")))?;

    let document = Html::parse_document(html);

    let item_sel = Selector::parse("li.mega-menu-item.relative").unwrap();
    let title_sel = Selector::parse("div.mega-menu-item-title a").unwrap();
    let badge_sel = Selector::parse("div.extra-info-cont img").unwrap();

    let mut items = Vec::new();

    for (idx, entry) in document.select(&item_sel).enumerate() {
        let anchor = entry.select(&title_sel).next().ok_or_else(|| {
            WatchError::Extraction(format!("listing entry {idx}: title link missing"))
        })?;

        let name = anchor.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            return Err(WatchError::Extraction(format!(
                "listing entry {idx}: title text empty"
            )));
        }

        let href = anchor.value().attr("href").ok_or_else(|| {
            WatchError::Extraction(format!("listing entry {idx}: title link has no href"))
        })?;

        let url = base
            .join(href)
            .map_err(|e| {
                WatchError::Extraction(format!("listing entry {idx}: bad href '{href}': {e}"))
            })?
            .to_string();

        items.push(Promo {
            name,
            url,
            is_happy_hour: has_happy_hour_badge(&entry, &badge_sel),
        });
    }

    Ok(items)
}

/// True iff the entry carries a badge image whose alt text is "happy hour".
///
/// Any structural absence (no badge container, no image, no alt attribute)
/// resolves to false rather than an error.
fn has_happy_hour_badge(entry: &ElementRef<'_>, badge_sel: &Selector) -> bool {
    entry
        .select(badge_sel)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(|alt| alt.trim().eq_ignore_ascii_case(BADGE_ALT))
        .unwrap_or(false)
}
