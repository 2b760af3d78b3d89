//! Directional-hysteresis temperature control.
//!
//! Cooling and heating are two independent flags. Each one enters at a wide
//! offset from the target and leaves at a narrow one (`hyst`), and each is
//! forced off as soon as the target is reached or crossed. All values are raw
//! ×10 °C.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::hysteresis::hysteresis;

/// Enter/exit offsets for one temperature loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureBand {
    /// Cooling starts above `target + delta_hi_raw`.
    pub delta_hi_raw: i32,
    /// Heating starts below `target - delta_lo_raw`.
    pub delta_lo_raw: i32,
    /// Either flag stops once back within `hyst_raw` of the target.
    pub hyst_raw: i32,
}

impl TemperatureBand {
    /// Chamber (outer) loop: 1.5 / 1.0 / 0.5 °C.
    pub const CHAMBER: Self = Self {
        delta_hi_raw: 15,
        delta_lo_raw: 10,
        hyst_raw: 5,
    };

    /// Supply (inner) loop: 1.0 / 1.0 / 0.3 °C.
    pub const SUPPLY: Self = Self {
        delta_hi_raw: 10,
        delta_lo_raw: 10,
        hyst_raw: 3,
    };

    pub fn new(delta_hi_raw: i32, delta_lo_raw: i32, hyst_raw: i32) -> ControlResult<Self> {
        let band = Self {
            delta_hi_raw,
            delta_lo_raw,
            hyst_raw,
        };
        band.validate()?;
        Ok(band)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if self.hyst_raw < 0 {
            return Err(ControlError::InvalidArg {
                what: "temperature hyst must be non-negative",
            });
        }
        if self.hyst_raw >= self.delta_hi_raw || self.hyst_raw >= self.delta_lo_raw {
            return Err(ControlError::BandOrdering {
                what: "temperature hyst must be smaller than delta_hi and delta_lo",
            });
        }
        Ok(())
    }

    /// Advance the cooling/heating flags by one tick.
    pub fn step(&self, measured: i32, target: i32, state: TemperatureState) -> TemperatureState {
        temperature_control(measured, target, self, state)
    }
}

impl Default for TemperatureBand {
    fn default() -> Self {
        Self::CHAMBER
    }
}

/// Persistent cooling/heating demand for one loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureState {
    pub cooling: bool,
    pub heating: bool,
}

/// One tick of the directional state machine.
pub fn temperature_control(
    measured: i32,
    target: i32,
    band: &TemperatureBand,
    state: TemperatureState,
) -> TemperatureState {
    // Negative lower offset turns the exit threshold into target + hyst.
    let mut cooling = hysteresis(
        measured,
        target,
        band.delta_hi_raw,
        -band.hyst_raw,
        state.cooling,
    );
    if measured <= target {
        cooling = false;
    }

    // Mirrored: the target plays the measured role.
    let mut heating = hysteresis(
        target,
        measured,
        band.delta_lo_raw,
        -band.hyst_raw,
        state.heating,
    );
    if measured >= target {
        heating = false;
    }

    TemperatureState { cooling, heating }
}
