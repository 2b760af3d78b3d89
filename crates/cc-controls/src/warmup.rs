//! Supply warm-up tracking.
//!
//! Supply readings right after the fans start are not representative. This
//! tracker marks them ready once the active phase has lasted long enough.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmupTracker {
    pub warmup_s: u32,
    /// Elapsed seconds at which the current active phase began.
    pub active_since: Option<u32>,
}

impl Default for WarmupTracker {
    fn default() -> Self {
        Self::new(120)
    }
}

impl WarmupTracker {
    pub fn new(warmup_s: u32) -> Self {
        Self {
            warmup_s,
            active_since: None,
        }
    }

    pub fn update(&mut self, active: bool, elapsed_seconds: u32) {
        match (active, self.active_since) {
            (true, None) => self.active_since = Some(elapsed_seconds),
            (false, Some(_)) => self.active_since = None,
            _ => {}
        }
    }

    pub fn is_ready(&self, elapsed_seconds: u32) -> bool {
        self.active_since
            .is_some_and(|since| elapsed_seconds.saturating_sub(since) >= self.warmup_s)
    }
}
