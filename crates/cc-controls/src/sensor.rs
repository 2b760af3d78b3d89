//! Sensor-side conditioning: plausibility screening and fault counting with
//! last-good fallback.

use serde::{Deserialize, Serialize};

use cc_core::ensure_finite;
use cc_psychro::PlausibleRange;

use crate::error::{ControlError, ControlResult};
use crate::signal::AirReading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Consecutive failures before a channel is in fallback.
    pub max_errors: u32,
    /// Readings outside this window count as failed reads.
    pub plausible: PlausibleRange,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_errors: 3,
            plausible: PlausibleRange::default(),
        }
    }
}

impl SensorConfig {
    pub fn validate(&self) -> ControlResult<()> {
        if self.max_errors == 0 {
            return Err(ControlError::InvalidArg {
                what: "max_errors must be positive",
            });
        }
        ensure_finite(self.plausible.min_temp_c, "plausible min_temp_c")?;
        ensure_finite(self.plausible.max_temp_c, "plausible max_temp_c")?;
        if self.plausible.min_temp_c >= self.plausible.max_temp_c {
            return Err(ControlError::InvalidArg {
                what: "plausible temperature window is empty",
            });
        }
        Ok(())
    }

    /// `None` for readings the psychrometric math must not see.
    pub fn screen(&self, reading: Option<AirReading>) -> Option<AirReading> {
        reading.filter(|r| self.plausible.check_raw(r.temp_raw, r.rh_raw).is_ok())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorFaultCounter {
    pub consecutive_errors: u32,
}

impl SensorFaultCounter {
    pub fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    pub fn record_failure(&mut self) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }

    pub fn is_faulted(&self, max_errors: u32) -> bool {
        self.consecutive_errors >= max_errors
    }
}

/// Fault counter plus the last reading that came in clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorGuard<T> {
    pub counter: SensorFaultCounter,
    pub last_good: Option<T>,
    pub max_errors: u32,
}

impl<T: Copy> SensorGuard<T> {
    pub fn new(max_errors: u32) -> Self {
        Self {
            counter: SensorFaultCounter::default(),
            last_good: None,
            max_errors,
        }
    }

    /// Feed one read attempt; `None` is a failed read.
    pub fn accept(&mut self, reading: Option<T>) -> Option<T> {
        match reading {
            Some(value) => {
                self.counter.record_success();
                self.last_good = Some(value);
                Some(value)
            }
            None => {
                self.counter.record_failure();
                self.last_good
            }
        }
    }

    pub fn in_fallback(&self) -> bool {
        self.counter.is_faulted(self.max_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_falls_back_to_last_good() {
        let mut guard = SensorGuard::new(3);
        assert_eq!(guard.accept(None), None::<i32>);
        assert_eq!(guard.accept(Some(150)), Some(150));
        assert_eq!(guard.accept(None), Some(150));
        assert_eq!(guard.accept(None), Some(150));
        assert!(!guard.in_fallback());
        assert_eq!(guard.accept(None), Some(150));
        assert!(guard.in_fallback());
        assert_eq!(guard.accept(Some(151)), Some(151));
        assert!(!guard.in_fallback());
        assert_eq!(guard.counter.consecutive_errors, 0);
    }

    #[test]
    fn screen_drops_implausible_readings() {
        let cfg = SensorConfig::default();
        let good = AirReading::new(150, 750);
        assert_eq!(cfg.screen(Some(good)), Some(good));
        assert_eq!(cfg.screen(Some(AirReading::new(150, 5000))), None);
        assert_eq!(cfg.screen(Some(AirReading::new(150, -10))), None);
        assert_eq!(cfg.screen(Some(AirReading::new(i32::MAX, 500))), None);
        assert_eq!(cfg.screen(Some(AirReading::new(-401, 500))), None);
        assert_eq!(cfg.screen(None), None);
    }

    #[test]
    fn empty_plausible_window_is_rejected() {
        let cfg = SensorConfig {
            plausible: PlausibleRange {
                min_temp_c: 20.0,
                max_temp_c: 20.0,
            },
            ..SensorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
