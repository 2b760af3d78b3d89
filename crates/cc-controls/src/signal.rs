//! Per-tick boundary values exchanged with the host I/O layer.
//!
//! Temperatures and humidities cross this boundary as raw ×10 integers
//! (`150` is 15.0 °C, `855` is 85.5 %RH).

use serde::{Deserialize, Serialize};

use cc_psychro::AirState;

/// One temperature/RH sensor pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirReading {
    pub temp_raw: i32,
    pub rh_raw: i32,
}

impl AirReading {
    pub const fn new(temp_raw: i32, rh_raw: i32) -> Self {
        Self { temp_raw, rh_raw }
    }

    pub fn to_air_state(self) -> AirState {
        AirState::from_raw(self.temp_raw, self.rh_raw)
    }
}

/// Resolved readings of all three sensors for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub chamber_temp_raw: i32,
    pub chamber_rh_raw: i32,
    pub supply_temp_raw: i32,
    pub supply_rh_raw: i32,
    pub outdoor_temp_raw: i32,
    pub outdoor_rh_raw: i32,
}

impl SensorReading {
    pub fn new(chamber: AirReading, supply: AirReading, outdoor: AirReading) -> Self {
        Self {
            chamber_temp_raw: chamber.temp_raw,
            chamber_rh_raw: chamber.rh_raw,
            supply_temp_raw: supply.temp_raw,
            supply_rh_raw: supply.rh_raw,
            outdoor_temp_raw: outdoor.temp_raw,
            outdoor_rh_raw: outdoor.rh_raw,
        }
    }

    pub fn chamber(&self) -> AirReading {
        AirReading::new(self.chamber_temp_raw, self.chamber_rh_raw)
    }

    pub fn supply(&self) -> AirReading {
        AirReading::new(self.supply_temp_raw, self.supply_rh_raw)
    }

    pub fn outdoor(&self) -> AirReading {
        AirReading::new(self.outdoor_temp_raw, self.outdoor_rh_raw)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlTarget {
    pub target_temp_raw: i32,
    pub target_rh_raw: i32,
}

impl ControlTarget {
    pub const fn new(target_temp_raw: i32, target_rh_raw: i32) -> Self {
        Self {
            target_temp_raw,
            target_rh_raw,
        }
    }

    pub fn to_air_state(self) -> AirState {
        AirState::from_raw(self.target_temp_raw, self.target_rh_raw)
    }
}

/// Operator mode switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    pub summer_mode: bool,
    pub humi_save_mode: bool,
    /// `Some(true)` forces sleep, `Some(false)` forces active, `None` runs
    /// the automatic cycle.
    pub sleep_requested: Option<bool>,
    /// Adds to the chamber's configured humidifier flag.
    pub humidifier_installed: bool,
}

/// Everything the host hands the controller for one tick. A `None` reading
/// is a failed sensor read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub chamber: Option<AirReading>,
    pub supply: Option<AirReading>,
    pub outdoor: Option<AirReading>,
    pub target: ControlTarget,
    pub modes: ModeFlags,
    /// Seconds since controller (re)start.
    pub elapsed_seconds: u32,
}

impl TickInput {
    pub fn from_readings(
        readings: SensorReading,
        target: ControlTarget,
        modes: ModeFlags,
        elapsed_seconds: u32,
    ) -> Self {
        Self {
            chamber: Some(readings.chamber()),
            supply: Some(readings.supply()),
            outdoor: Some(readings.outdoor()),
            target,
            modes,
            elapsed_seconds,
        }
    }
}
