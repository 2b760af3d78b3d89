//! Sleep-cycle scheduler.
//!
//! Alternates an active phase and a sleep phase on a tick countdown. While
//! asleep the coordinator gates warm and cool relays off; the temperature
//! and humidity decisions keep running underneath.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Phase lengths in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepCycleConfig {
    pub action_time: u32,
    pub sleep_time: u32,
}

impl Default for SleepCycleConfig {
    fn default() -> Self {
        Self {
            action_time: 540,
            sleep_time: 60,
        }
    }
}

impl SleepCycleConfig {
    pub fn validate(&self) -> ControlResult<()> {
        if self.action_time == 0 || self.sleep_time == 0 {
            return Err(ControlError::InvalidArg {
                what: "sleep cycle phase lengths must be positive",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepCycleState {
    pub active: bool,
    pub manual_override: bool,
    /// Ticks left in the current phase.
    pub countdown: i64,
}

impl SleepCycleState {
    /// Fresh state at the start of an active phase.
    pub fn new(config: &SleepCycleConfig) -> Self {
        Self {
            active: true,
            manual_override: false,
            countdown: i64::from(config.action_time),
        }
    }

    pub fn is_sleeping(&self) -> bool {
        !self.active
    }

    /// Advance one tick. Returns `true` on a phase transition.
    pub fn advance(&mut self, config: &SleepCycleConfig) -> bool {
        if self.manual_override {
            return false;
        }
        self.countdown -= 1;
        if self.countdown > 0 {
            return false;
        }
        self.active = !self.active;
        self.countdown = if self.active {
            i64::from(config.action_time)
        } else {
            i64::from(config.sleep_time)
        };
        true
    }

    /// Pin the phase by hand. Returns `true` if the phase changed.
    pub fn set_manual(&mut self, sleep: bool) -> bool {
        let was_active = self.active;
        self.manual_override = true;
        self.active = !sleep;
        was_active != self.active
    }

    /// Hand the phase back to the countdown.
    pub fn set_automatic(&mut self) {
        self.manual_override = false;
    }

    /// Apply a host request: `Some(sleep)` pins the phase, `None` releases it.
    pub fn apply_request(&mut self, request: Option<bool>) -> bool {
        match request {
            Some(sleep) => self.set_manual(sleep),
            None => {
                self.set_automatic();
                false
            }
        }
    }
}

impl Default for SleepCycleState {
    fn default() -> Self {
        Self::new(&SleepCycleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_after_action_time() {
        let cfg = SleepCycleConfig::default();
        let mut state = SleepCycleState::new(&cfg);
        for _ in 0..539 {
            assert!(!state.advance(&cfg));
        }
        assert!(state.active);
        assert!(state.advance(&cfg));
        assert!(!state.active);
        assert_eq!(state.countdown, 60);
    }

    #[test]
    fn returns_to_active_after_sleep_time() {
        let cfg = SleepCycleConfig {
            action_time: 3,
            sleep_time: 2,
        };
        let mut state = SleepCycleState::new(&cfg);
        let edges: Vec<bool> = (0..5).map(|_| state.advance(&cfg)).collect();
        assert_eq!(edges, vec![false, false, true, false, true]);
        assert!(state.active);
        assert_eq!(state.countdown, 3);
    }

    #[test]
    fn manual_override_freezes_countdown() {
        let cfg = SleepCycleConfig::default();
        let mut state = SleepCycleState::new(&cfg);
        assert!(state.set_manual(true));
        assert!(state.is_sleeping());
        for _ in 0..1000 {
            assert!(!state.advance(&cfg));
        }
        assert_eq!(state.countdown, 540);

        state.set_automatic();
        state.advance(&cfg);
        assert_eq!(state.countdown, 539);
    }

    #[test]
    fn apply_request() {
        let mut state = SleepCycleState::default();
        assert!(!state.apply_request(Some(false)));
        assert!(state.manual_override);
        assert!(state.apply_request(Some(true)));
        assert!(!state.apply_request(None));
        assert!(!state.manual_override);
        assert!(state.is_sleeping());
    }

    #[test]
    fn zero_phase_is_rejected() {
        let cfg = SleepCycleConfig {
            action_time: 0,
            sleep_time: 60,
        };
        assert!(cfg.validate().is_err());
    }
}
