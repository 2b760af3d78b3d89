//! FINE / HUMID / DRY humidity classifier.
//!
//! Works on absolute humidity (g/m³), which does not move when the chamber
//! temperature does. The same state machine runs for the chamber (outer) loop
//! and the supply (inner) loop with different band widths; the inner band
//! must sit entirely inside the outer one.

use serde::{Deserialize, Serialize};

use cc_core::Real;

use crate::error::{ControlError, ControlResult};

/// Humidity demand of one loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityMode {
    /// Within the deadzone, no action.
    #[default]
    Fine,
    /// Too much water: dehumidify.
    Humid,
    /// Too little water: humidify or protect.
    Dry,
}

impl HumidityMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fine => "fine",
            Self::Humid => "humid",
            Self::Dry => "dry",
        }
    }
}

/// Deadzone `D` and exit margin `H` (both g/m³), `H < D`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityBand {
    pub deadzone: Real,
    pub hysteresis: Real,
}

impl HumidityBand {
    /// Chamber (outer) loop: D = 0.8, H = 0.3.
    pub const CHAMBER: Self = Self {
        deadzone: 0.8,
        hysteresis: 0.3,
    };

    /// Supply (inner) loop: D = 0.5, H = 0.2.
    pub const SUPPLY: Self = Self {
        deadzone: 0.5,
        hysteresis: 0.2,
    };

    pub fn new(deadzone: Real, hysteresis: Real) -> ControlResult<Self> {
        let band = Self {
            deadzone,
            hysteresis,
        };
        band.validate()?;
        Ok(band)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if !self.deadzone.is_finite() || !self.hysteresis.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "humidity band must be finite",
            });
        }
        if self.hysteresis < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "humidity hysteresis must be non-negative",
            });
        }
        if self.hysteresis >= self.deadzone {
            return Err(ControlError::BandOrdering {
                what: "humidity hysteresis must be smaller than the deadzone",
            });
        }
        Ok(())
    }

    /// `true` if `inner` fits inside this band.
    pub fn contains_band(&self, inner: &HumidityBand) -> bool {
        inner.deadzone <= self.deadzone
    }

    /// AH error (current − target) within the deadzone.
    pub fn is_inside_deadzone(&self, ah_error: Real) -> bool {
        ah_error.abs() <= self.deadzone
    }

    pub fn thresholds(&self, target_ah: Real) -> HumidityThresholds {
        HumidityThresholds {
            enter_humid: target_ah + self.deadzone,
            exit_humid: target_ah - self.hysteresis,
            enter_dry: target_ah - self.deadzone,
            exit_dry: target_ah + self.hysteresis,
        }
    }

    /// Advance the mode by one tick.
    pub fn next_mode(&self, current_ah: Real, target_ah: Real, mode: HumidityMode) -> HumidityMode {
        self.thresholds(target_ah).next_mode(current_ah, mode)
    }
}

impl Default for HumidityBand {
    fn default() -> Self {
        Self::CHAMBER
    }
}

/// Absolute thresholds around a specific target AH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidityThresholds {
    pub enter_humid: Real,
    pub exit_humid: Real,
    pub enter_dry: Real,
    pub exit_dry: Real,
}

impl HumidityThresholds {
    pub fn next_mode(&self, current_ah: Real, mode: HumidityMode) -> HumidityMode {
        if current_ah > self.enter_humid {
            return HumidityMode::Humid;
        }
        if current_ah < self.enter_dry {
            return HumidityMode::Dry;
        }
        match mode {
            HumidityMode::Humid if current_ah > self.exit_humid => HumidityMode::Humid,
            HumidityMode::Dry if current_ah < self.exit_dry => HumidityMode::Dry,
            HumidityMode::Humid => HumidityMode::Fine,
            HumidityMode::Dry => HumidityMode::Fine,
            HumidityMode::Fine => HumidityMode::Fine,
        }
    }
}

/// AH error inside the chamber (outer) deadzone.
pub fn is_inside_chamber_deadzone(ah_error: Real) -> bool {
    HumidityBand::CHAMBER.is_inside_deadzone(ah_error)
}

/// AH error inside the supply (inner) deadzone.
pub fn is_inside_supply_deadzone(ah_error: Real) -> bool {
    HumidityBand::SUPPLY.is_inside_deadzone(ah_error)
}
