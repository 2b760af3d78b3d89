//! Site schema definitions.
//!
//! Values in site files are engineering units (°C, %RH, g/m³, seconds);
//! conversion to the controller's raw ×10 scale happens at compile time in
//! the application layer. Every tuning field is optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub chambers: Vec<ChamberDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChamberDef {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub humidifier_installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<TargetDef>,
    #[serde(default)]
    pub tuning: TuningDef,
}

/// Setpoint pair in engineering units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetDef {
    pub temp_c: f64,
    pub rh_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TuningDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chamber_temperature: Option<TemperatureBandDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_temperature: Option<TemperatureBandDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chamber_humidity: Option<HumidityBandDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_humidity: Option<HumidityBandDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_cooling_when_dry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economizer: Option<EconomizerDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_backup_gap_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_target: Option<SupplyTargetDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<SleepDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_init_s: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<SensorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmup_s: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_interval_s: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureBandDef {
    pub delta_hi_c: f64,
    pub delta_lo_c: f64,
    pub hyst_c: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HumidityBandDef {
    /// g/m³
    pub deadzone: f64,
    /// g/m³
    pub hysteresis: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct EconomizerDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<EconomizerVariantDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rh_tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_c: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EconomizerVariantDef {
    MixingModel,
    Threshold,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SupplyTargetDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_c: Option<f64>,
}

/// Phase lengths in ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepDef {
    pub action_ticks: u32,
    pub sleep_ticks: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SensorDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_errors: Option<u32>,
    /// Readings colder than this are rejected as sensor faults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plausible_min_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plausible_max_c: Option<f64>,
}

impl Site {
    pub fn chamber(&self, id: &str) -> Option<&ChamberDef> {
        self.chambers.iter().find(|c| c.id == id)
    }
}
