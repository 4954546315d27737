//! Novelty detection — the transition into happy-hour status.

use crate::error::WatchResult;
use crate::extract::Promo;
use crate::history::HistoryStore;

/// Decide whether `item` is a newly started happy hour.
///
/// True only on the transition from "not happy hour" (or never seen) to
/// "happy hour", judged against the single most recent prior observation
/// of the same (name, url). A happy-hour period spanning several runs is
/// therefore flagged exactly once, at its start.
///
/// Read-only: the one store lookup is the only effect.
pub fn is_new_happy_hour(item: &Promo, history: &HistoryStore) -> WatchResult<bool> {
    if !item.is_happy_hour {
        return Ok(false);
    }

    match history.most_recent(&item.name, &item.url)? {
        Some(prior) => Ok(!prior.is_happy_hour),
        None => Ok(true),
    }
}
