//! Per-chamber controller: owns the persistent state and runs one tick.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cc_core::Real;

use crate::arbitration::{ArbitratedDemand, ArbitrationConfig, better_cold_than_dry};
use crate::config::ControllerConfig;
use crate::coordinator::{ActuatorCommands, CoordinatorInput, coordinate};
use crate::economizer::MixingInput;
use crate::error::ControlResult;
use crate::humidity::HumidityMode;
use crate::safe_init::InitState;
use crate::sensor::{SensorConfig, SensorGuard};
use crate::signal::{AirReading, SensorReading, TickInput};
use crate::sleep::SleepCycleState;
use crate::temperature::TemperatureState;
use crate::warmup::WarmupTracker;

/// Everything that persists between ticks. Hosts may store it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub chamber_temperature: TemperatureState,
    pub supply_temperature: TemperatureState,
    pub chamber_humidity: HumidityMode,
    pub supply_humidity: HumidityMode,
    pub sleep: SleepCycleState,
    pub init: InitState,
    pub chamber_sensor: SensorGuard<AirReading>,
    pub supply_sensor: SensorGuard<AirReading>,
    pub outdoor_sensor: SensorGuard<AirReading>,
    pub warmup: WarmupTracker,
}

impl ControllerState {
    /// Cold-start state.
    pub fn new(config: &ControllerConfig) -> Self {
        let max_errors = config.sensor.max_errors;
        Self {
            chamber_temperature: TemperatureState::default(),
            supply_temperature: TemperatureState::default(),
            chamber_humidity: HumidityMode::Fine,
            supply_humidity: HumidityMode::Fine,
            sleep: SleepCycleState::new(&config.sleep),
            init: InitState::default(),
            chamber_sensor: SensorGuard::new(max_errors),
            supply_sensor: SensorGuard::new(max_errors),
            outdoor_sensor: SensorGuard::new(max_errors),
            warmup: WarmupTracker::new(config.warmup_s),
        }
    }
}

/// Intermediate results of one tick, for diagnostics and replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlDecision {
    pub readings: SensorReading,
    pub chamber_ah: Real,
    pub supply_ah: Real,
    pub target_ah: Real,
    pub chamber_temperature: TemperatureState,
    pub supply_temperature: TemperatureState,
    pub chamber_humidity: HumidityMode,
    pub supply_humidity: HumidityMode,
    pub demand: ArbitratedDemand,
    pub dehumidify: bool,
    pub economizer_beneficial: bool,
    pub inside_deadzone: bool,
    pub sleeping: bool,
    pub init_complete: bool,
    pub supply_ready: bool,
    pub sensor_fallback: bool,
    /// Coordinator output before the safe-init gate.
    pub requested: ActuatorCommands,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub commands: ActuatorCommands,
    pub supply_target_raw: i32,
    /// `None` when no chamber or outdoor reading has ever been available.
    pub decision: Option<ControlDecision>,
}

#[derive(Debug, Clone)]
pub struct ChamberController {
    config: ControllerConfig,
    state: ControllerState,
}

impl ChamberController {
    pub fn new(config: ControllerConfig) -> ControlResult<Self> {
        config.validate()?;
        let state = ControllerState::new(&config);
        Ok(Self { config, state })
    }

    /// Resume from persisted state.
    pub fn with_state(config: ControllerConfig, state: ControllerState) -> ControlResult<Self> {
        config.validate()?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn into_state(self) -> ControllerState {
        self.state
    }

    /// Run one control tick.
    pub fn tick(&mut self, input: &TickInput) -> TickOutput {
        let cfg = &self.config;
        let state = &mut self.state;

        let sensor = &cfg.sensor;
        let chamber = guard_reading(sensor, &mut state.chamber_sensor, input.chamber, "chamber");
        let outdoor = guard_reading(sensor, &mut state.outdoor_sensor, input.outdoor, "outdoor");
        let supply = guard_reading(sensor, &mut state.supply_sensor, input.supply, "supply");
        let sensor_fallback = state.chamber_sensor.in_fallback()
            || state.outdoor_sensor.in_fallback()
            || state.supply_sensor.in_fallback();

        // Sleep phase and the init latch advance even without readings.
        let requested_edge = state.sleep.apply_request(input.modes.sleep_requested);
        let cycle_edge = state.sleep.advance(&cfg.sleep);
        if requested_edge || cycle_edge {
            debug!(
                active = state.sleep.active,
                manual = state.sleep.manual_override,
                "sleep phase changed"
            );
        }
        let sleeping = state.sleep.is_sleeping();
        if state.init.update(input.elapsed_seconds, &cfg.safe_init) {
            info!(elapsed_s = input.elapsed_seconds, "safe-init complete, outputs enabled");
        }
        state.warmup.update(!sleeping, input.elapsed_seconds);

        let target = input.target;
        let (Some(chamber), Some(outdoor)) = (chamber, outdoor) else {
            return TickOutput {
                commands: ActuatorCommands::all_off(),
                supply_target_raw: cfg.supply_target.calculate(
                    false,
                    target.target_temp_raw,
                    target.target_temp_raw,
                    target.target_temp_raw,
                ),
                decision: None,
            };
        };

        let chamber_air = chamber.to_air_state();
        let outdoor_air = outdoor.to_air_state();
        let target_air = target.to_air_state();
        let chamber_ah = chamber_air.absolute_humidity();
        let target_ah = target_air.absolute_humidity();

        state.chamber_temperature = cfg.chamber_temperature.step(
            chamber.temp_raw,
            target.target_temp_raw,
            state.chamber_temperature,
        );

        let previous_mode = state.chamber_humidity;
        state.chamber_humidity =
            cfg.chamber_humidity
                .next_mode(chamber_ah, target_ah, state.chamber_humidity);
        if state.chamber_humidity != previous_mode {
            debug!(
                from = previous_mode.label(),
                to = state.chamber_humidity.label(),
                chamber_ah,
                target_ah,
                "chamber humidity mode changed"
            );
        }

        let arbitration = ArbitrationConfig {
            humidifier_installed: cfg.arbitration.humidifier_installed
                || input.modes.humidifier_installed,
            ..cfg.arbitration
        };
        let demand = better_cold_than_dry(
            state.chamber_temperature,
            state.chamber_humidity,
            chamber.temp_raw,
            &arbitration,
        );
        if demand.heating_blocked {
            debug!(
                chamber_temp_raw = chamber.temp_raw,
                min_temp_raw = arbitration.min_temp_raw,
                "heating withheld while dry"
            );
        }

        let economizer_beneficial = cfg.economizer.evaluate(
            &MixingInput {
                chamber_t: chamber_air.temp_c(),
                chamber_rh: chamber_air.rh_percent,
                target_t: target_air.temp_c(),
                target_rh: target_air.rh_percent,
                outdoor_t: outdoor_air.temp_c(),
                outdoor_rh: outdoor_air.rh_percent,
            },
            chamber.temp_raw,
            outdoor.temp_raw,
        );

        let dehumidify = state.chamber_humidity == HumidityMode::Humid;
        let requested = coordinate(
            &CoordinatorInput {
                cooling: demand.cooling,
                heating: demand.heating,
                dehumidify,
                dry: state.chamber_humidity == HumidityMode::Dry,
                economizer_beneficial,
                summer_mode: input.modes.summer_mode,
                humi_save_mode: input.modes.humi_save_mode,
                sleep_mode: sleeping,
                humidifier_installed: arbitration.humidifier_installed,
                chamber_temp_raw: chamber.temp_raw,
                outdoor_temp_raw: outdoor.temp_raw,
            },
            &cfg.coordinator,
        );

        let inside_deadzone = cfg.chamber_humidity.is_inside_deadzone(chamber_ah - target_ah);
        let supply_target_raw = cfg.supply_target.calculate(
            inside_deadzone,
            target.target_temp_raw,
            chamber.temp_raw,
            outdoor.temp_raw,
        );

        // Inner loop tracks the supply target; it holds while the supply
        // sensor has never reported.
        let supply_reading =
            supply.unwrap_or(AirReading::new(supply_target_raw, target.target_rh_raw));
        let supply_ah = supply_reading.to_air_state().absolute_humidity();
        if supply.is_some() {
            state.supply_temperature = cfg.supply_temperature.step(
                supply_reading.temp_raw,
                supply_target_raw,
                state.supply_temperature,
            );
            state.supply_humidity =
                cfg.supply_humidity
                    .next_mode(supply_ah, target_ah, state.supply_humidity);
        }

        let commands = state.init.gate(requested);

        let decision = ControlDecision {
            readings: SensorReading::new(chamber, supply_reading, outdoor),
            chamber_ah,
            supply_ah,
            target_ah,
            chamber_temperature: state.chamber_temperature,
            supply_temperature: state.supply_temperature,
            chamber_humidity: state.chamber_humidity,
            supply_humidity: state.supply_humidity,
            demand,
            dehumidify,
            economizer_beneficial,
            inside_deadzone,
            sleeping,
            init_complete: state.init.complete,
            supply_ready: state.warmup.is_ready(input.elapsed_seconds),
            sensor_fallback,
            requested,
        };

        TickOutput {
            commands,
            supply_target_raw,
            decision: Some(decision),
        }
    }
}

/// Implausible readings count as failed reads.
fn guard_reading(
    sensor: &SensorConfig,
    guard: &mut SensorGuard<AirReading>,
    reading: Option<AirReading>,
    channel: &'static str,
) -> Option<AirReading> {
    let screened = sensor.screen(reading);
    if let (Some(raw), None) = (reading, screened) {
        warn!(
            channel,
            temp_raw = raw.temp_raw,
            rh_raw = raw.rh_raw,
            "implausible reading rejected"
        );
    }
    let was_fallback = guard.in_fallback();
    let resolved = guard.accept(screened);
    if guard.in_fallback() && !was_fallback {
        warn!(
            channel,
            errors = guard.counter.consecutive_errors,
            "sensor in fallback, using last good reading"
        );
    }
    resolved
}
