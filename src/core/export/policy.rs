//! Polling budget and cancellation for the ZIP export

use crate::config::ExportConfig;
use std::time::Duration;
use tokio::sync::watch;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 300;

/// How often and how long to poll
///
/// The defaults give a ceiling of roughly ten minutes.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Raised to `true` to abandon the export between polls
    pub cancel: Option<watch::Receiver<bool>>,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            cancel: None,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.poll_interval(), config.max_poll_attempts)
    }

    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_POLL_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert_eq!(policy.max_attempts, 300);
        assert!(policy.cancel.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = ExportConfig {
            poll_interval_ms: 500,
            max_poll_attempts: 20,
            ..ExportConfig::default()
        };
        let policy = PollPolicy::from_config(&config);
        assert_eq!(policy.interval, Duration::from_millis(500));
        assert_eq!(policy.max_attempts, 20);
    }

    #[test]
    fn test_with_cancel() {
        let (_tx, rx) = watch::channel(false);
        let policy = PollPolicy::default().with_cancel(rx);
        assert!(policy.cancel.is_some());
    }
}
