use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Cooperative stop signal for a running search.
///
/// Clones share the same flag, so a handle kept by the caller (or another
/// thread) can stop every search started with the same config. Time limits
/// live on [`Config`](super::config::Config) instead, since they restart
/// with every evaluation.
#[derive(Debug, Clone, Default)]
pub struct Cancel {
    flag: Arc<AtomicBool>,
}

impl Cancel {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
