//! "Better cold than dry".
//!
//! Without a humidifier, heating a dry chamber lowers its RH further and the
//! product loses water it cannot get back. Heating is therefore withheld
//! while the chamber is DRY, unless the chamber is already at or below the
//! minimum temperature floor.

use serde::{Deserialize, Serialize};

use crate::humidity::HumidityMode;
use crate::temperature::TemperatureState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrationConfig {
    /// Floor (raw ×10 °C) at or below which heating is always allowed.
    pub min_temp_raw: i32,
    /// A humidifier handles DRY on its own; heating is never blocked.
    pub humidifier_installed: bool,
    /// Also suppress cooling while DRY at or below the floor.
    pub block_cooling_when_dry: bool,
}

impl Default for ArbitrationConfig {
    fn default() -> Self {
        Self {
            min_temp_raw: 110,
            humidifier_installed: false,
            block_cooling_when_dry: false,
        }
    }
}

/// Temperature demand after arbitration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitratedDemand {
    pub cooling: bool,
    pub heating: bool,
    pub heating_blocked: bool,
    pub cooling_blocked: bool,
}

/// Apply the policy to the chamber loop's temperature demand.
pub fn better_cold_than_dry(
    demand: TemperatureState,
    mode: HumidityMode,
    chamber_temp_raw: i32,
    config: &ArbitrationConfig,
) -> ArbitratedDemand {
    let dry_without_humidifier = mode == HumidityMode::Dry && !config.humidifier_installed;
    let above_floor = chamber_temp_raw > config.min_temp_raw;

    let heating_blocked = demand.heating && dry_without_humidifier && above_floor;
    let cooling_blocked = config.block_cooling_when_dry
        && demand.cooling
        && dry_without_humidifier
        && !above_floor;

    ArbitratedDemand {
        cooling: demand.cooling && !cooling_blocked,
        heating: demand.heating && !heating_blocked,
        heating_blocked,
        cooling_blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAT: TemperatureState = TemperatureState {
        cooling: false,
        heating: true,
    };
    const COOL: TemperatureState = TemperatureState {
        cooling: true,
        heating: false,
    };

    #[test]
    fn blocks_heating_when_dry_above_floor() {
        let cfg = ArbitrationConfig::default();
        let out = better_cold_than_dry(HEAT, HumidityMode::Dry, 120, &cfg);
        assert!(out.heating_blocked);
        assert!(!out.heating);
    }

    #[test]
    fn allows_heating_at_floor() {
        let cfg = ArbitrationConfig::default();
        let out = better_cold_than_dry(HEAT, HumidityMode::Dry, 110, &cfg);
        assert!(!out.heating_blocked);
        assert!(out.heating);
        let out = better_cold_than_dry(HEAT, HumidityMode::Dry, 105, &cfg);
        assert!(out.heating);
    }

    #[test]
    fn humidifier_never_blocks() {
        let cfg = ArbitrationConfig {
            humidifier_installed: true,
            ..ArbitrationConfig::default()
        };
        let out = better_cold_than_dry(HEAT, HumidityMode::Dry, 150, &cfg);
        assert!(out.heating);
        assert!(!out.heating_blocked);
    }

    #[test]
    fn only_dry_blocks() {
        let cfg = ArbitrationConfig::default();
        for mode in [HumidityMode::Fine, HumidityMode::Humid] {
            let out = better_cold_than_dry(HEAT, mode, 150, &cfg);
            assert!(out.heating, "{mode:?}");
        }
    }

    #[test]
    fn cooling_block_is_opt_in() {
        let cfg = ArbitrationConfig::default();
        let out = better_cold_than_dry(COOL, HumidityMode::Dry, 100, &cfg);
        assert!(out.cooling);

        let cfg = ArbitrationConfig {
            block_cooling_when_dry: true,
            ..cfg
        };
        let out = better_cold_than_dry(COOL, HumidityMode::Dry, 100, &cfg);
        assert!(!out.cooling);
        assert!(out.cooling_blocked);
        let out = better_cold_than_dry(COOL, HumidityMode::Dry, 130, &cfg);
        assert!(out.cooling);
    }
}
