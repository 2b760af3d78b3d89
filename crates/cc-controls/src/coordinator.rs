//! Relay/valve coordinator.
//!
//! Folds the upstream decisions into the final actuator set. The rules are
//! applied in a fixed order; the bypass valve closes whenever the cold water
//! is needed for dehumidification.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Winter mode falls back to water cooling when the outdoor/chamber gap
    /// (raw ×10 °C) is at most this.
    pub water_backup_gap_raw: i32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            water_backup_gap_raw: 30,
        }
    }
}

/// Everything the coordinator needs from one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorInput {
    /// Arbitrated chamber cooling demand.
    pub cooling: bool,
    /// Arbitrated chamber heating demand.
    pub heating: bool,
    /// Chamber humidity mode is HUMID.
    pub dehumidify: bool,
    /// Chamber humidity mode is DRY.
    pub dry: bool,
    pub economizer_beneficial: bool,
    pub summer_mode: bool,
    pub humi_save_mode: bool,
    pub sleep_mode: bool,
    pub humidifier_installed: bool,
    pub chamber_temp_raw: i32,
    pub outdoor_temp_raw: i32,
}

/// Final actuator set for one chamber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorCommands {
    pub relay_warm: bool,
    pub relay_cool: bool,
    /// Subset of `relay_cool`: cooling water used to condense moisture.
    pub relay_dehumidify_water: bool,
    pub relay_humidifier: bool,
    /// Open sends 8 °C water, closed sends 0 °C water.
    pub relay_bypass_open: bool,
    pub relay_outdoor_air_max: bool,
    pub relay_outdoor_air_save: bool,
    pub relay_recirculation: bool,
    pub relay_main_fan: bool,
}

impl ActuatorCommands {
    pub const RELAY_NAMES: [&'static str; 9] = [
        "relay_warm",
        "relay_cool",
        "relay_dehumidify_water",
        "relay_humidifier",
        "relay_bypass_open",
        "relay_outdoor_air_max",
        "relay_outdoor_air_save",
        "relay_recirculation",
        "relay_main_fan",
    ];

    pub fn all_off() -> Self {
        Self::default()
    }

    /// Relay states in [`Self::RELAY_NAMES`] order.
    pub fn as_array(&self) -> [bool; 9] {
        [
            self.relay_warm,
            self.relay_cool,
            self.relay_dehumidify_water,
            self.relay_humidifier,
            self.relay_bypass_open,
            self.relay_outdoor_air_max,
            self.relay_outdoor_air_save,
            self.relay_recirculation,
            self.relay_main_fan,
        ]
    }

    pub fn any_on(&self) -> bool {
        self.as_array().iter().any(|on| *on)
    }

    /// Cooling and warming together only while dehumidifying.
    pub fn interlock_ok(&self, dehumidify: bool) -> bool {
        !(self.relay_cool && self.relay_warm) || dehumidify
    }
}

/// Water cooling is used in summer, or in winter when outdoor air is too
/// close to chamber temperature to cool for free.
pub fn water_cooling_backup(input: &CoordinatorInput, config: &CoordinatorConfig) -> bool {
    input.summer_mode
        || (input.outdoor_temp_raw - input.chamber_temp_raw).abs() <= config.water_backup_gap_raw
}

pub fn coordinate(input: &CoordinatorInput, config: &CoordinatorConfig) -> ActuatorCommands {
    let relay_bypass_open = input.humi_save_mode || (input.cooling && !input.dehumidify);
    let backup = water_cooling_backup(input, config);
    let relay_cool = (input.cooling || input.dehumidify) && !input.sleep_mode && backup;
    let relay_outdoor_air_max =
        input.economizer_beneficial && !input.summer_mode && !input.humi_save_mode;
    let relay_warm = input.heating && !input.sleep_mode;
    let relay_humidifier = input.dry && input.humidifier_installed;

    ActuatorCommands {
        relay_warm,
        relay_cool,
        relay_dehumidify_water: relay_cool && input.dehumidify,
        relay_humidifier,
        relay_bypass_open,
        relay_outdoor_air_max,
        relay_outdoor_air_save: input.humi_save_mode,
        relay_recirculation: input.humi_save_mode,
        relay_main_fan: input.summer_mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summer() -> CoordinatorInput {
        CoordinatorInput {
            summer_mode: true,
            chamber_temp_raw: 150,
            outdoor_temp_raw: 250,
            ..CoordinatorInput::default()
        }
    }

    #[test]
    fn idle_is_all_off_except_fan() {
        let cmd = coordinate(&summer(), &CoordinatorConfig::default());
        assert_eq!(
            cmd,
            ActuatorCommands {
                relay_main_fan: true,
                ..ActuatorCommands::all_off()
            }
        );
    }

    #[test]
    fn cooling_without_dehumidify_opens_bypass() {
        let input = CoordinatorInput {
            cooling: true,
            ..summer()
        };
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(cmd.relay_cool);
        assert!(cmd.relay_bypass_open);
        assert!(!cmd.relay_dehumidify_water);
    }

    #[test]
    fn dehumidify_closes_bypass() {
        let input = CoordinatorInput {
            cooling: true,
            dehumidify: true,
            ..summer()
        };
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(cmd.relay_cool);
        assert!(!cmd.relay_bypass_open);
        assert!(cmd.relay_dehumidify_water);
    }

    #[test]
    fn humi_save_forces_bypass_and_aux() {
        let input = CoordinatorInput {
            dehumidify: true,
            humi_save_mode: true,
            economizer_beneficial: true,
            ..summer()
        };
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(cmd.relay_bypass_open);
        assert!(cmd.relay_outdoor_air_save);
        assert!(cmd.relay_recirculation);
        assert!(!cmd.relay_outdoor_air_max);
    }

    #[test]
    fn winter_uses_free_cooling_when_gap_is_large() {
        let mut input = CoordinatorInput {
            cooling: true,
            chamber_temp_raw: 150,
            outdoor_temp_raw: 0,
            economizer_beneficial: true,
            ..CoordinatorInput::default()
        };
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(!cmd.relay_cool);
        assert!(cmd.relay_outdoor_air_max);

        input.outdoor_temp_raw = 120;
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(cmd.relay_cool);

        input.outdoor_temp_raw = 119;
        assert!(!coordinate(&input, &CoordinatorConfig::default()).relay_cool);
    }

    #[test]
    fn sleep_gates_warm_and_cool() {
        let input = CoordinatorInput {
            cooling: true,
            heating: true,
            dehumidify: true,
            sleep_mode: true,
            ..summer()
        };
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(!cmd.relay_cool);
        assert!(!cmd.relay_warm);
    }

    #[test]
    fn humidifier_only_when_installed() {
        let mut input = CoordinatorInput {
            dry: true,
            ..summer()
        };
        assert!(!coordinate(&input, &CoordinatorConfig::default()).relay_humidifier);
        input.humidifier_installed = true;
        assert!(coordinate(&input, &CoordinatorConfig::default()).relay_humidifier);
    }

    #[test]
    fn heat_and_cool_together_only_when_dehumidifying() {
        let input = CoordinatorInput {
            heating: true,
            dehumidify: true,
            ..summer()
        };
        let cmd = coordinate(&input, &CoordinatorConfig::default());
        assert!(cmd.relay_warm && cmd.relay_cool);
        assert!(cmd.interlock_ok(true));
        assert!(!cmd.interlock_ok(false));
    }

    #[test]
    fn relay_names_match_array() {
        let cmd = ActuatorCommands {
            relay_main_fan: true,
            ..ActuatorCommands::all_off()
        };
        assert!(cmd.as_array()[8]);
        assert_eq!(ActuatorCommands::RELAY_NAMES[8], "relay_main_fan");
        assert!(cmd.any_on());
        assert!(!ActuatorCommands::all_off().any_on());
    }
}
