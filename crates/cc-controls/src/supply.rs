//! Supply-air temperature target.
//!
//! Outside the chamber's AH deadzone the target is pushed proportionally
//! past the setpoint. Inside it, part of the correction is handed to the
//! outdoor air share of the blend.

use serde::{Deserialize, Serialize};

use cc_core::{Real, ensure_finite, ensure_in_range, round_half_away};

use crate::error::{ControlError, ControlResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyTargetConfig {
    /// Proportional gain outside the deadzone.
    pub gain: Real,
    /// Outdoor share of the blend inside the deadzone, in [0, 1].
    pub mix_ratio: Real,
    pub min_raw: i32,
    pub max_raw: i32,
}

impl Default for SupplyTargetConfig {
    fn default() -> Self {
        Self {
            gain: 1.0,
            mix_ratio: 0.3,
            min_raw: 60,
            max_raw: 400,
        }
    }
}

impl SupplyTargetConfig {
    pub fn validate(&self) -> ControlResult<()> {
        ensure_finite(self.gain, "supply gain")?;
        ensure_in_range(self.mix_ratio, 0.0, 1.0, "supply mix_ratio")?;
        if self.min_raw >= self.max_raw {
            return Err(ControlError::BandOrdering {
                what: "supply min_raw must be below max_raw",
            });
        }
        Ok(())
    }

    /// Pick the law by deadzone membership, then clamp.
    pub fn calculate(
        &self,
        inside_deadzone: bool,
        target_raw: i32,
        chamber_raw: i32,
        outdoor_raw: i32,
    ) -> i32 {
        let unclamped = if inside_deadzone {
            supply_target_inside_deadzone(target_raw, chamber_raw, outdoor_raw, self.mix_ratio)
        } else {
            supply_target_outside_deadzone(target_raw, chamber_raw, self.gain)
        };
        clamp_supply_target(unclamped, self.min_raw, self.max_raw)
    }
}

/// `round(target − (chamber − target)·gain)`, raw units.
pub fn supply_target_outside_deadzone(target_raw: i32, chamber_raw: i32, gain: Real) -> i32 {
    let target = Real::from(target_raw);
    let error = Real::from(chamber_raw - target_raw);
    round_half_away(target - error * gain)
}

/// `round(target − (chamber − target)·(1−mix) − (outdoor − target)·mix)`, raw units.
pub fn supply_target_inside_deadzone(
    target_raw: i32,
    chamber_raw: i32,
    outdoor_raw: i32,
    mix_ratio: Real,
) -> i32 {
    let target = Real::from(target_raw);
    let chamber_error = Real::from(chamber_raw - target_raw);
    let outdoor_error = Real::from(outdoor_raw - target_raw);
    round_half_away(target - chamber_error * (1.0 - mix_ratio) - outdoor_error * mix_ratio)
}

pub fn clamp_supply_target(value_raw: i32, min_raw: i32, max_raw: i32) -> i32 {
    value_raw.clamp(min_raw, max_raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_deadzone_mirrors_error() {
        assert_eq!(supply_target_outside_deadzone(150, 180, 1.0), 120);
        assert_eq!(supply_target_outside_deadzone(150, 120, 1.0), 180);
        assert_eq!(supply_target_outside_deadzone(150, 150, 1.0), 150);
    }

    #[test]
    fn inside_deadzone_blends_outdoor() {
        // 150 - 5*0.7 - 50*0.3 = 131.5
        assert_eq!(supply_target_inside_deadzone(150, 155, 200, 0.3), 132);
    }

    #[test]
    fn negative_halves_round_away() {
        // 10 - 25*0.5 = -2.5
        assert_eq!(supply_target_outside_deadzone(10, 35, 0.5), -3);
    }

    #[test]
    fn calculate_clamps() {
        let cfg = SupplyTargetConfig::default();
        assert_eq!(cfg.calculate(false, 150, 180, 0), 120);
        assert_eq!(cfg.calculate(true, 150, 155, 200), 132);
        assert_eq!(cfg.calculate(false, 100, 200, 0), 60);
        assert_eq!(cfg.calculate(false, 300, 100, 0), 400);
    }

    #[test]
    fn validate_rejects_bad_config() {
        assert!(SupplyTargetConfig::default().validate().is_ok());
        let bad_mix = SupplyTargetConfig {
            mix_ratio: 1.5,
            ..SupplyTargetConfig::default()
        };
        assert!(bad_mix.validate().is_err());
        let bad_limits = SupplyTargetConfig {
            min_raw: 400,
            max_raw: 60,
            ..SupplyTargetConfig::default()
        };
        assert!(bad_limits.validate().is_err());
    }
}
