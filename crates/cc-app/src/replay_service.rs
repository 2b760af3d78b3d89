//! Scenario replay: feed a scenario's ticks through a fresh controller.

use serde::Serialize;
use tracing::{debug, info};

use cc_controls::{
    AirReading, ChamberController, ModeFlags, RelayBank, RelayEvent, TickInput, TickOutput,
};
use cc_project::{ChamberDef, ReadingDef, Scenario};

use crate::error::{AppError, AppResult};
use crate::runtime_compile::{c_to_raw, compile_chamber, target_to_raw};

/// One replayed tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayRecord {
    pub tick: u64,
    pub elapsed_s: u32,
    pub input: TickInput,
    pub output: TickOutput,
    /// Relays the I/O layer would have switched on this tick. The first
    /// record reports every relay.
    pub relay_events: Vec<RelayEvent>,
}

fn reading(def: &ReadingDef) -> AirReading {
    AirReading::new(c_to_raw(def.temp_c), c_to_raw(def.rh_percent))
}

/// Run every tick of `scenario` through a controller compiled from
/// `chamber`. Elapsed time starts at 0 and advances by the chamber's tick
/// interval.
pub fn run_scenario(chamber: &ChamberDef, scenario: &Scenario) -> AppResult<Vec<ReplayRecord>> {
    if scenario.ticks.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Scenario '{}' has no ticks",
            scenario.name
        )));
    }

    let config = compile_chamber(chamber)?;
    let tick_interval_s = config.tick_interval_s;
    let mut controller = ChamberController::new(config)?;
    let mut relays = RelayBank::default();

    info!(
        chamber = %chamber.id,
        scenario = %scenario.name,
        ticks = scenario.tick_count(),
        "starting replay"
    );

    let mut records = Vec::with_capacity(scenario.tick_count() as usize);
    for (tick, step) in scenario.expanded().enumerate() {
        let tick = tick as u64;
        let elapsed_s = u32::try_from(tick)
            .ok()
            .and_then(|t| t.checked_mul(tick_interval_s))
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Scenario '{}' is too long", scenario.name))
            })?;

        let input = TickInput {
            chamber: Some(reading(&step.chamber)),
            supply: step.supply.as_ref().map(reading),
            outdoor: Some(reading(&step.outdoor)),
            target: target_to_raw(&step.target),
            modes: ModeFlags {
                summer_mode: step.summer_mode,
                humi_save_mode: step.humi_save_mode,
                sleep_requested: step.sleep_requested,
                humidifier_installed: false,
            },
            elapsed_seconds: elapsed_s,
        };
        let output = controller.tick(&input);
        let relay_events = relays.apply(&output.commands);
        for event in &relay_events {
            debug!(tick, relay = event.relay, action = ?event.action, "relay switched");
        }
        records.push(ReplayRecord {
            tick,
            elapsed_s,
            input,
            output,
            relay_events,
        });
    }

    info!(chamber = %chamber.id, records = records.len(), "replay finished");
    Ok(records)
}
