//! Configuration loading and resolution.
//!
//! Every field resolves CLI flag → environment → default, so the watcher
//! can run unattended from cron with nothing but environment variables.

use std::path::PathBuf;

/// Listing page watched when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.indiegala.com";

/// Resolved configuration for one watch run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing page URL; extracted item links resolve against it.
    pub base_url: String,
    /// History database location.
    pub db_path: PathBuf,
    /// Webhook to notify; `None` disables delivery.
    pub webhook_url: Option<String>,
    /// Fetch and delivery timeout in milliseconds.
    pub timeout_ms: u64,
    /// Fetch over plain HTTP instead of a headless browser.
    pub no_browser: bool,
}

impl Config {
    /// Resolve a full config from CLI flags, environment, and defaults.
    pub fn resolve(
        base_url: Option<&str>,
        db: Option<&str>,
        webhook: Option<&str>,
        timeout_ms: u64,
        no_browser: bool,
    ) -> Self {
        Self {
            base_url: resolve_base_url(base_url),
            db_path: resolve_db_path(db),
            webhook_url: resolve_webhook_url(webhook),
            timeout_ms,
            no_browser,
        }
    }
}

/// Resolve the listing page URL.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }

    if let Ok(env_url) = std::env::var("HHWATCH_BASE_URL") {
        return env_url;
    }

    DEFAULT_BASE_URL.to_string()
}

/// Resolve the history database path.
pub fn resolve_db_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = std::env::var("HHWATCH_DB") {
        return PathBuf::from(env_path);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".hhwatch")
        .join("history.db")
}

/// Resolve the webhook URL. Absent means delivery is skipped.
pub fn resolve_webhook_url(explicit: Option<&str>) -> Option<String> {
    if let Some(url) = explicit {
        return Some(url.to_string());
    }

    std::env::var("HHWATCH_WEBHOOK_URL").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags_win() {
        assert_eq!(resolve_base_url(Some("https://shop.test")), "https://shop.test");
        assert_eq!(resolve_db_path(Some("/var/lib/hh.db")), PathBuf::from("/var/lib/hh.db"));
        assert_eq!(
            resolve_webhook_url(Some("https://hooks.test/abc")),
            Some("https://hooks.test/abc".to_string())
        );
    }

    #[test]
    fn test_db_path_default_ends_with_history_db() {
        let path = resolve_db_path(None);
        assert!(path.ends_with("history.db") || path.to_string_lossy().contains("history.db"));
    }
}
