//! Controller tuning in one place.

use serde::{Deserialize, Serialize};

use crate::arbitration::ArbitrationConfig;
use crate::coordinator::CoordinatorConfig;
use crate::economizer::EconomizerConfig;
use crate::error::{ControlError, ControlResult};
use crate::humidity::HumidityBand;
use crate::safe_init::SafeInitConfig;
use crate::sensor::SensorConfig;
use crate::sleep::SleepCycleConfig;
use crate::supply::SupplyTargetConfig;
use crate::temperature::TemperatureBand;

/// Every tunable of one chamber controller. `Default` is the reference
/// deployment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub chamber_temperature: TemperatureBand,
    pub supply_temperature: TemperatureBand,
    pub chamber_humidity: HumidityBand,
    pub supply_humidity: HumidityBand,
    pub arbitration: ArbitrationConfig,
    pub economizer: EconomizerConfig,
    pub coordinator: CoordinatorConfig,
    pub supply_target: SupplyTargetConfig,
    pub sleep: SleepCycleConfig,
    pub safe_init: SafeInitConfig,
    pub sensor: SensorConfig,
    pub warmup_s: u32,
    pub tick_interval_s: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            chamber_temperature: TemperatureBand::CHAMBER,
            supply_temperature: TemperatureBand::SUPPLY,
            chamber_humidity: HumidityBand::CHAMBER,
            supply_humidity: HumidityBand::SUPPLY,
            arbitration: ArbitrationConfig::default(),
            economizer: EconomizerConfig::default(),
            coordinator: CoordinatorConfig::default(),
            supply_target: SupplyTargetConfig::default(),
            sleep: SleepCycleConfig::default(),
            safe_init: SafeInitConfig::default(),
            sensor: SensorConfig::default(),
            warmup_s: 120,
            tick_interval_s: 5,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> ControlResult<()> {
        self.chamber_temperature.validate()?;
        self.supply_temperature.validate()?;
        self.chamber_humidity.validate()?;
        self.supply_humidity.validate()?;
        if !self.chamber_humidity.contains_band(&self.supply_humidity) {
            return Err(ControlError::BandOrdering {
                what: "supply humidity deadzone must not exceed chamber deadzone",
            });
        }
        self.economizer.validate()?;
        self.supply_target.validate()?;
        self.sleep.validate()?;
        self.sensor.validate()?;
        if self.coordinator.water_backup_gap_raw < 0 {
            return Err(ControlError::InvalidArg {
                what: "water_backup_gap_raw must be non-negative",
            });
        }
        if self.tick_interval_s == 0 {
            return Err(ControlError::InvalidArg {
                what: "tick_interval_s must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn inner_humidity_band_must_fit() {
        let cfg = ControllerConfig {
            supply_humidity: HumidityBand {
                deadzone: 1.0,
                hysteresis: 0.2,
            },
            ..ControllerConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ControlError::BandOrdering { .. })
        ));
    }

    #[test]
    fn temperature_hyst_must_be_inside_band() {
        let cfg = ControllerConfig {
            chamber_temperature: TemperatureBand {
                delta_hi_raw: 15,
                delta_lo_raw: 5,
                hyst_raw: 5,
            },
            ..ControllerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let cfg = ControllerConfig {
            tick_interval_s: 0,
            ..ControllerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ControllerConfig =
            serde_json::from_str(r#"{"warmup_s": 60, "sleep": {"action_time": 100, "sleep_time": 10}}"#)
                .unwrap();
        assert_eq!(cfg.warmup_s, 60);
        assert_eq!(cfg.sleep.action_time, 100);
        assert_eq!(cfg.safe_init.duration_s, 32);
    }
}
