//! Error taxonomy for a watch run.

/// All errors a single watch run can produce.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    /// The listing page could not be retrieved or rendered.
    #[error("fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    /// The page markup did not match the expected structure.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The history batch append (or a history read) failed.
    #[error("persistence failed: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Webhook delivery failed. History is already committed by this point.
    #[error("notification failed: {0:#}")]
    Notification(anyhow::Error),
}

impl WatchError {
    /// Whether this error must abort the run with a non-zero exit.
    ///
    /// Everything except notification delivery is fatal: a lost append
    /// would make future novelty detection permanently wrong, while a
    /// lost notification loses nothing durable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WatchError::Notification(_))
    }
}

pub type WatchResult<T> = Result<T, WatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_notification_is_non_fatal() {
        let fetch = WatchError::Fetch(anyhow::anyhow!("timed out"));
        let extraction = WatchError::Extraction("title link missing".to_string());
        let persistence = WatchError::Persistence(rusqlite::Error::InvalidQuery);
        let notification = WatchError::Notification(anyhow::anyhow!("webhook returned 500"));

        assert!(fetch.is_fatal());
        assert!(extraction.is_fatal());
        assert!(persistence.is_fatal());
        assert!(!notification.is_fatal());
    }
}
