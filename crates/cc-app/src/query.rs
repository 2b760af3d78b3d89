//! Query helpers for replay records.

use cc_controls::{ActuatorCommands, HumidityMode};

use crate::error::{AppError, AppResult};
use crate::replay_service::ReplayRecord;

/// Summary of a replay.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub tick_count: usize,
    pub time_range: (u32, u32),
    /// Ticks each relay spent on, in `ActuatorCommands::RELAY_NAMES` order.
    pub relay_on_ticks: Vec<(&'static str, usize)>,
    pub supply_target_range: (i32, i32),
    pub humid_ticks: usize,
    pub dry_ticks: usize,
    pub fallback_ticks: usize,
    /// Relay switch events after the initial report.
    pub relay_switches: usize,
}

pub fn get_replay_summary(records: &[ReplayRecord]) -> AppResult<ReplaySummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in replay".to_string()));
    };

    let mut on = [0usize; 9];
    let mut min_supply = i32::MAX;
    let mut max_supply = i32::MIN;
    let mut humid_ticks = 0;
    let mut dry_ticks = 0;
    let mut fallback_ticks = 0;

    for record in records {
        for (count, state) in on.iter_mut().zip(record.output.commands.as_array()) {
            if state {
                *count += 1;
            }
        }
        min_supply = min_supply.min(record.output.supply_target_raw);
        max_supply = max_supply.max(record.output.supply_target_raw);
        if let Some(decision) = &record.output.decision {
            match decision.chamber_humidity {
                HumidityMode::Humid => humid_ticks += 1,
                HumidityMode::Dry => dry_ticks += 1,
                HumidityMode::Fine => {}
            }
            if decision.sensor_fallback {
                fallback_ticks += 1;
            }
        }
    }

    Ok(ReplaySummary {
        tick_count: records.len(),
        time_range: (first.elapsed_s, last.elapsed_s),
        relay_on_ticks: ActuatorCommands::RELAY_NAMES.into_iter().zip(on).collect(),
        supply_target_range: (min_supply, max_supply),
        humid_ticks,
        dry_ticks,
        fallback_ticks,
        relay_switches: records.iter().skip(1).map(|r| r.relay_events.len()).sum(),
    })
}

/// `(elapsed_s, state)` series for one relay by name.
pub fn relay_series(records: &[ReplayRecord], relay: &str) -> AppResult<Vec<(u32, bool)>> {
    let index = ActuatorCommands::RELAY_NAMES
        .iter()
        .position(|name| *name == relay)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown relay: {}", relay)))?;

    Ok(records
        .iter()
        .map(|r| (r.elapsed_s, r.output.commands.as_array()[index]))
        .collect())
}

fn mode_label(mode: Option<HumidityMode>) -> &'static str {
    mode.map(HumidityMode::label).unwrap_or("")
}

/// One CSV row per record: inputs, supply target, humidity modes, relays.
pub fn records_to_csv(records: &[ReplayRecord]) -> String {
    let mut csv = String::from(
        "tick,elapsed_s,chamber_temp_raw,chamber_rh_raw,outdoor_temp_raw,outdoor_rh_raw,\
         target_temp_raw,target_rh_raw,supply_target_raw,chamber_mode,supply_mode,sleeping",
    );
    for name in ActuatorCommands::RELAY_NAMES {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push('\n');

    for r in records {
        let decision = r.output.decision.as_ref();
        let readings = decision.map(|d| d.readings);
        let cell = |v: Option<i32>| v.map(|v| v.to_string()).unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            r.tick,
            r.elapsed_s,
            cell(readings.map(|x| x.chamber_temp_raw)),
            cell(readings.map(|x| x.chamber_rh_raw)),
            cell(readings.map(|x| x.outdoor_temp_raw)),
            cell(readings.map(|x| x.outdoor_rh_raw)),
            r.input.target.target_temp_raw,
            r.input.target.target_rh_raw,
            r.output.supply_target_raw,
            mode_label(decision.map(|d| d.chamber_humidity)),
            mode_label(decision.map(|d| d.supply_humidity)),
            u8::from(decision.is_some_and(|d| d.sleeping)),
        ));
        for state in r.output.commands.as_array() {
            csv.push(',');
            csv.push(if state { '1' } else { '0' });
        }
        csv.push('\n');
    }
    csv
}
