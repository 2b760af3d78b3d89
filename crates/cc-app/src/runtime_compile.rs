//! Compilation of a `ChamberDef` into a runtime `ControllerConfig`.
//!
//! Site files speak °C; the controller speaks raw ×10 integers. This is the
//! only place the two meet.

use cc_controls::{
    ControlTarget, ControllerConfig, EconomizerVariant, HumidityBand, SleepCycleConfig,
    TemperatureBand,
};
use cc_core::real_to_raw;
use cc_project::schema::{
    ChamberDef, EconomizerVariantDef, HumidityBandDef, TargetDef, TemperatureBandDef,
};

use crate::error::{AppError, AppResult};

/// °C (or %RH) to raw ×10, rounded half away from zero.
pub fn c_to_raw(value: f64) -> i32 {
    real_to_raw(value)
}

fn temperature_band(def: &TemperatureBandDef) -> TemperatureBand {
    TemperatureBand {
        delta_hi_raw: c_to_raw(def.delta_hi_c),
        delta_lo_raw: c_to_raw(def.delta_lo_c),
        hyst_raw: c_to_raw(def.hyst_c),
    }
}

fn humidity_band(def: &HumidityBandDef) -> HumidityBand {
    HumidityBand {
        deadzone: def.deadzone,
        hysteresis: def.hysteresis,
    }
}

/// Compile a chamber definition, filling unset fields from the defaults.
pub fn compile_chamber(chamber: &ChamberDef) -> AppResult<ControllerConfig> {
    let tuning = &chamber.tuning;
    let mut config = ControllerConfig::default();

    if let Some(band) = &tuning.chamber_temperature {
        config.chamber_temperature = temperature_band(band);
    }
    if let Some(band) = &tuning.supply_temperature {
        config.supply_temperature = temperature_band(band);
    }
    if let Some(band) = &tuning.chamber_humidity {
        config.chamber_humidity = humidity_band(band);
    }
    if let Some(band) = &tuning.supply_humidity {
        config.supply_humidity = humidity_band(band);
    }

    config.arbitration.humidifier_installed = chamber.humidifier_installed;
    if let Some(min) = tuning.min_temp_c {
        config.arbitration.min_temp_raw = c_to_raw(min);
    }
    if let Some(block) = tuning.block_cooling_when_dry {
        config.arbitration.block_cooling_when_dry = block;
    }

    if let Some(econ) = &tuning.economizer {
        if let Some(variant) = econ.variant {
            config.economizer.variant = match variant {
                EconomizerVariantDef::MixingModel => EconomizerVariant::MixingModel,
                EconomizerVariantDef::Threshold => EconomizerVariant::Threshold,
            };
        }
        if let Some(mix) = econ.mix_ratio {
            config.economizer.mix_ratio = mix;
        }
        if let Some(tol) = econ.rh_tolerance {
            config.economizer.rh_tolerance = tol;
        }
        if let Some(th) = econ.threshold_c {
            config.economizer.threshold_raw = c_to_raw(th);
        }
    }

    if let Some(gap) = tuning.water_backup_gap_c {
        config.coordinator.water_backup_gap_raw = c_to_raw(gap);
    }

    if let Some(supply) = &tuning.supply_target {
        if let Some(gain) = supply.gain {
            config.supply_target.gain = gain;
        }
        if let Some(mix) = supply.mix_ratio {
            config.supply_target.mix_ratio = mix;
        }
        if let Some(min) = supply.min_c {
            config.supply_target.min_raw = c_to_raw(min);
        }
        if let Some(max) = supply.max_c {
            config.supply_target.max_raw = c_to_raw(max);
        }
    }

    if let Some(sleep) = &tuning.sleep {
        config.sleep = SleepCycleConfig {
            action_time: sleep.action_ticks,
            sleep_time: sleep.sleep_ticks,
        };
    }
    if let Some(duration) = tuning.safe_init_s {
        config.safe_init.duration_s = duration;
    }
    if let Some(sensor) = &tuning.sensor {
        if let Some(max) = sensor.max_errors {
            config.sensor.max_errors = max;
        }
        if let Some(min) = sensor.plausible_min_c {
            config.sensor.plausible.min_temp_c = min;
        }
        if let Some(max) = sensor.plausible_max_c {
            config.sensor.plausible.max_temp_c = max;
        }
    }
    if let Some(warmup) = tuning.warmup_s {
        config.warmup_s = warmup;
    }
    if let Some(tick) = tuning.tick_interval_s {
        config.tick_interval_s = tick;
    }

    config
        .validate()
        .map_err(|e| AppError::Compile(format!("{}: {}", chamber.id, e)))?;
    Ok(config)
}

/// Convert a setpoint to raw.
pub fn target_to_raw(target: &TargetDef) -> ControlTarget {
    ControlTarget::new(c_to_raw(target.temp_c), c_to_raw(target.rh_percent))
}

/// The chamber's default setpoint, raw.
pub fn default_target(chamber: &ChamberDef) -> Option<ControlTarget> {
    chamber.default_target.as_ref().map(target_to_raw)
}
