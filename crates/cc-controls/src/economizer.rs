//! Outdoor-air economizer evaluation.
//!
//! The mixing model blends a fraction of outdoor air into the chamber air,
//! projects the blend's moisture at the target temperature and accepts it
//! only if it moves the temperature toward the target without wrecking the
//! humidity. RH is only ever compared at one temperature (the target).

use serde::{Deserialize, Serialize};

use cc_core::{Real, ensure_in_range};
use cc_psychro::{absolute_humidity, rh_from_absolute_humidity};

use crate::error::{ControlError, ControlResult};

/// Which evaluator decides outdoor-air benefit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomizerVariant {
    /// Psychrometric mixing projection.
    #[default]
    MixingModel,
    /// Chamber at least `threshold_raw` warmer than outdoors.
    Threshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomizerConfig {
    pub variant: EconomizerVariant,
    /// Outdoor fraction of the blend, in [0, 1].
    pub mix_ratio: Real,
    /// Projected RH within this many percentage points of target is acceptable.
    pub rh_tolerance: Real,
    /// Threshold variant: minimum chamber − outdoor difference (raw ×10 °C).
    pub threshold_raw: i32,
}

impl Default for EconomizerConfig {
    fn default() -> Self {
        Self {
            variant: EconomizerVariant::MixingModel,
            mix_ratio: 0.30,
            rh_tolerance: 5.0,
            threshold_raw: 50,
        }
    }
}

/// Conditions fed to the mixing model, in °C and %.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingInput {
    pub chamber_t: Real,
    pub chamber_rh: Real,
    pub target_t: Real,
    pub target_rh: Real,
    pub outdoor_t: Real,
    pub outdoor_rh: Real,
}

/// Breakdown of one mixing-model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutdoorAssessment {
    pub mixed_t: Real,
    pub mixed_ah: Real,
    pub target_ah: Real,
    /// RH of the blended moisture once the chamber sits at `target_t`.
    pub projected_rh: Real,
    pub temp_improves: bool,
    pub ah_improves: bool,
    pub rh_acceptable: bool,
    pub beneficial: bool,
}

/// Full mixing-model assessment.
pub fn assess_outdoor_air(
    input: &MixingInput,
    mix_ratio: Real,
    rh_tolerance: Real,
) -> OutdoorAssessment {
    let chamber_ah = absolute_humidity(input.chamber_t, input.chamber_rh);
    let outdoor_ah = absolute_humidity(input.outdoor_t, input.outdoor_rh);
    let target_ah = absolute_humidity(input.target_t, input.target_rh);

    let mixed_t = (1.0 - mix_ratio) * input.chamber_t + mix_ratio * input.outdoor_t;
    let mixed_ah = (1.0 - mix_ratio) * chamber_ah + mix_ratio * outdoor_ah;

    let projected_rh = rh_from_absolute_humidity(input.target_t, mixed_ah);

    let toward_target = (input.chamber_t > input.target_t && input.outdoor_t < input.chamber_t)
        || (input.chamber_t < input.target_t && input.outdoor_t > input.chamber_t);
    let closer = (mixed_t - input.target_t).abs() < (input.chamber_t - input.target_t).abs();
    let temp_improves = toward_target && closer;

    let rh_acceptable = (projected_rh - input.target_rh).abs() < rh_tolerance;
    // Moisture content is temperature independent, so compare it directly.
    let ah_improves = (mixed_ah - target_ah).abs() <= (chamber_ah - target_ah).abs();

    OutdoorAssessment {
        mixed_t,
        mixed_ah,
        target_ah,
        projected_rh,
        temp_improves,
        ah_improves,
        rh_acceptable,
        beneficial: temp_improves && (ah_improves || rh_acceptable),
    }
}

/// Mixing-model benefit with the default 5 %RH tolerance.
pub fn evaluate_outdoor_benefit(
    chamber_t: Real,
    chamber_rh: Real,
    target_t: Real,
    target_rh: Real,
    outdoor_t: Real,
    outdoor_rh: Real,
    mix_ratio: Real,
) -> bool {
    let input = MixingInput {
        chamber_t,
        chamber_rh,
        target_t,
        target_rh,
        outdoor_t,
        outdoor_rh,
    };
    assess_outdoor_air(&input, mix_ratio, 5.0).beneficial
}

/// Simplified variant: chamber at least `threshold_raw` warmer than outdoors.
pub fn is_outdoor_beneficial(chamber_temp_raw: i32, outdoor_temp_raw: i32, threshold_raw: i32) -> bool {
    chamber_temp_raw - outdoor_temp_raw >= threshold_raw
}

impl EconomizerConfig {
    pub fn validate(&self) -> ControlResult<()> {
        ensure_in_range(self.mix_ratio, 0.0, 1.0, "economizer mix_ratio")?;
        if !(self.rh_tolerance > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "economizer rh_tolerance must be positive",
            });
        }
        Ok(())
    }

    /// Evaluate with the configured variant. Raw temperatures are passed
    /// alongside so the threshold variant stays in integer arithmetic.
    pub fn evaluate(&self, input: &MixingInput, chamber_temp_raw: i32, outdoor_temp_raw: i32) -> bool {
        match self.variant {
            EconomizerVariant::MixingModel => {
                assess_outdoor_air(input, self.mix_ratio, self.rh_tolerance).beneficial
            }
            EconomizerVariant::Threshold => {
                is_outdoor_beneficial(chamber_temp_raw, outdoor_temp_raw, self.threshold_raw)
            }
        }
    }
}
