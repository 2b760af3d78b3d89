//! Air state built from raw host readings.
//!
//! This is the one place where raw ×10 integers become floating point for
//! psychrometric math. Control decisions that compare against raw values
//! keep using the raw integers directly.

use cc_core::{Real, Temperature, raw_to_real, raw_to_temperature, to_degc};
use serde::{Deserialize, Serialize};

use crate::error::{PsychroError, PsychroResult};
use crate::psychro::{absolute_humidity, dew_point, rh_from_absolute_humidity};

/// Moist-air condition at one sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirState {
    pub temperature: Temperature,
    pub rh_percent: Real,
}

impl AirState {
    pub fn new(temp_c: Real, rh_percent: Real) -> Self {
        Self {
            temperature: cc_core::degc(temp_c),
            rh_percent,
        }
    }

    /// Build from raw ×10 temperature and RH.
    pub fn from_raw(temp_raw: i32, rh_raw: i32) -> Self {
        Self {
            temperature: raw_to_temperature(temp_raw),
            rh_percent: raw_to_real(rh_raw),
        }
    }

    pub fn temp_c(&self) -> Real {
        to_degc(self.temperature)
    }

    /// Absolute humidity (g/m³).
    pub fn absolute_humidity(&self) -> Real {
        absolute_humidity(self.temp_c(), self.rh_percent)
    }

    /// Dew point (°C), sentinel when RH is not positive.
    pub fn dew_point(&self) -> Real {
        dew_point(self.temp_c(), self.rh_percent)
    }

    /// RH this air's moisture would have if brought to `temp_c`.
    pub fn rh_at(&self, temp_c: Real) -> Real {
        rh_from_absolute_humidity(temp_c, self.absolute_humidity())
    }
}

/// Plausibility window applied before readings are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibleRange {
    pub min_temp_c: Real,
    pub max_temp_c: Real,
}

impl Default for PlausibleRange {
    fn default() -> Self {
        Self {
            min_temp_c: -40.0,
            max_temp_c: 60.0,
        }
    }
}

impl PlausibleRange {
    pub fn check(&self, temp_c: Real, rh_percent: Real) -> PsychroResult<()> {
        if !temp_c.is_finite() {
            return Err(PsychroError::NonFinite { what: "temperature" });
        }
        if !rh_percent.is_finite() {
            return Err(PsychroError::NonFinite {
                what: "relative humidity",
            });
        }
        if !(0.0..=100.0).contains(&rh_percent) {
            return Err(PsychroError::HumidityOutOfRange { rh_percent });
        }
        if temp_c < self.min_temp_c || temp_c > self.max_temp_c {
            return Err(PsychroError::TemperatureOutOfRange {
                temp_c,
                min_c: self.min_temp_c,
                max_c: self.max_temp_c,
            });
        }
        Ok(())
    }

    pub fn check_raw(&self, temp_raw: i32, rh_raw: i32) -> PsychroResult<()> {
        self.check(raw_to_real(temp_raw), raw_to_real(rh_raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_matches_float_constructor() {
        let a = AirState::from_raw(155, 730);
        let b = AirState::new(15.5, 73.0);
        assert!((a.temp_c() - b.temp_c()).abs() < 1e-12);
        assert!((a.absolute_humidity() - b.absolute_humidity()).abs() < 1e-12);
    }

    #[test]
    fn rh_at_own_temperature_is_identity() {
        let a = AirState::from_raw(120, 850);
        assert!((a.rh_at(12.0) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn plausible_range_rejects_bad_rh() {
        let range = PlausibleRange::default();
        assert!(range.check_raw(150, 750).is_ok());
        assert!(matches!(
            range.check_raw(150, 1010),
            Err(PsychroError::HumidityOutOfRange { .. })
        ));
        assert!(matches!(
            range.check(15.0, -1.0),
            Err(PsychroError::HumidityOutOfRange { .. })
        ));
    }

    #[test]
    fn plausible_range_rejects_bad_temperature() {
        let range = PlausibleRange::default();
        assert!(matches!(
            range.check(85.0, 50.0),
            Err(PsychroError::TemperatureOutOfRange { .. })
        ));
        assert!(matches!(
            range.check(f64::NAN, 50.0),
            Err(PsychroError::NonFinite { .. })
        ));
    }
}
