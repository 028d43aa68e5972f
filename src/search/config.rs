use super::cancel::Cancel;
use std::time::Duration;
use std::time::Instant;

/// Bounds for one evaluation.
///
/// `max_expansions` caps the recursive steps of a single exclusion; the
/// default is [`crate::MAX_EXPANSIONS`] unless `REMI_MAX_EXPANSIONS` is set.
/// `timeout` is measured from the moment a [`Search`](super::engine::Search)
/// is created, so every evaluation gets the full allowance again.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_expansions: usize,
    pub timeout: Option<Duration>,
    pub cancel: Cancel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_expansions: std::env::var("REMI_MAX_EXPANSIONS")
                .ok()
                .and_then(|n| n.trim().parse::<usize>().ok())
                .unwrap_or(crate::MAX_EXPANSIONS),
            timeout: None,
            cancel: Cancel::default(),
        }
    }
}

impl Config {
    pub fn with_max_expansions(self, max_expansions: usize) -> Self {
        Self {
            max_expansions,
            ..self
        }
    }
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }
    pub fn with_cancel(self, cancel: Cancel) -> Self {
        Self { cancel, ..self }
    }
    /// When a search starting now has to give up.
    pub fn deadline(&self) -> Option<Instant> {
        self.timeout.and_then(|t| Instant::now().checked_add(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_starts_when_asked() {
        let config = Config::default().with_timeout(Duration::from_millis(20));
        let first = config.deadline().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let second = config.deadline().unwrap();
        assert!(second > first);
        assert!(Config::default().deadline().is_none());
    }
}
