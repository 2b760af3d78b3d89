//! Site and scenario validation.
//!
//! Field-level checks only. Cross-field controller rules (band ordering and
//! the like) are enforced when a chamber is compiled into a runtime config.

use std::collections::HashSet;

use crate::scenario::{ReadingDef, Scenario};
use crate::schema::{ChamberDef, Site, TargetDef, TuningDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Range considered physically plausible for any temperature in a file.
const TEMP_RANGE_C: (f64, f64) = (-40.0, 60.0);

pub fn validate_site(site: &Site) -> Result<(), ValidationError> {
    if site.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: site.version,
        });
    }

    let mut ids = HashSet::new();
    for chamber in &site.chambers {
        if chamber.id.trim().is_empty() {
            return Err(invalid("chamber.id", "\"\"", "must not be empty"));
        }
        if !ids.insert(&chamber.id) {
            return Err(ValidationError::DuplicateId {
                id: chamber.id.clone(),
                context: "chambers".to_string(),
            });
        }
        validate_chamber(chamber)?;
    }
    Ok(())
}

fn validate_chamber(chamber: &ChamberDef) -> Result<(), ValidationError> {
    if let Some(target) = &chamber.default_target {
        validate_target(target, &format!("{}.default_target", chamber.id))?;
    }
    validate_tuning(&chamber.tuning, &chamber.id)
}

fn validate_tuning(tuning: &TuningDef, chamber_id: &str) -> Result<(), ValidationError> {
    let field = |name: &str| format!("{chamber_id}.tuning.{name}");

    for (name, band) in [
        ("chamber_temperature", &tuning.chamber_temperature),
        ("supply_temperature", &tuning.supply_temperature),
    ] {
        if let Some(band) = band {
            for (part, v) in [
                ("delta_hi_c", band.delta_hi_c),
                ("delta_lo_c", band.delta_lo_c),
                ("hyst_c", band.hyst_c),
            ] {
                non_negative(&field(&format!("{name}.{part}")), v)?;
            }
        }
    }
    for (name, band) in [
        ("chamber_humidity", &tuning.chamber_humidity),
        ("supply_humidity", &tuning.supply_humidity),
    ] {
        if let Some(band) = band {
            positive(&field(&format!("{name}.deadzone")), band.deadzone)?;
            non_negative(&field(&format!("{name}.hysteresis")), band.hysteresis)?;
        }
    }
    if let Some(t) = tuning.min_temp_c {
        temperature(&field("min_temp_c"), t)?;
    }
    if let Some(econ) = &tuning.economizer {
        if let Some(mix) = econ.mix_ratio {
            fraction(&field("economizer.mix_ratio"), mix)?;
        }
        if let Some(tol) = econ.rh_tolerance {
            positive(&field("economizer.rh_tolerance"), tol)?;
        }
        if let Some(th) = econ.threshold_c {
            finite(&field("economizer.threshold_c"), th)?;
        }
    }
    if let Some(gap) = tuning.water_backup_gap_c {
        non_negative(&field("water_backup_gap_c"), gap)?;
    }
    if let Some(supply) = &tuning.supply_target {
        if let Some(gain) = supply.gain {
            finite(&field("supply_target.gain"), gain)?;
        }
        if let Some(mix) = supply.mix_ratio {
            fraction(&field("supply_target.mix_ratio"), mix)?;
        }
        if let Some(min) = supply.min_c {
            temperature(&field("supply_target.min_c"), min)?;
        }
        if let Some(max) = supply.max_c {
            temperature(&field("supply_target.max_c"), max)?;
        }
    }
    if let Some(sleep) = &tuning.sleep {
        if sleep.action_ticks == 0 || sleep.sleep_ticks == 0 {
            return Err(invalid(
                &field("sleep"),
                &format!("{}/{}", sleep.action_ticks, sleep.sleep_ticks),
                "phase lengths must be positive",
            ));
        }
    }
    if let Some(sensor) = &tuning.sensor {
        if sensor.max_errors == Some(0) {
            return Err(invalid(&field("sensor.max_errors"), "0", "must be positive"));
        }
        for (name, value) in [
            ("sensor.plausible_min_c", sensor.plausible_min_c),
            ("sensor.plausible_max_c", sensor.plausible_max_c),
        ] {
            if let Some(v) = value {
                finite(&field(name), v)?;
            }
        }
        if let (Some(min), Some(max)) = (sensor.plausible_min_c, sensor.plausible_max_c) {
            if !(min < max) {
                return Err(invalid(
                    &field("sensor.plausible_min_c"),
                    &format!("{min}/{max}"),
                    "must be below plausible_max_c",
                ));
            }
        }
    }
    if tuning.tick_interval_s == Some(0) {
        return Err(invalid(&field("tick_interval_s"), "0", "must be positive"));
    }
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.ticks.is_empty() {
        return Err(invalid("ticks", "[]", "scenario has no ticks"));
    }
    for (i, step) in scenario.ticks.iter().enumerate() {
        if step.repeat == 0 {
            return Err(invalid(&format!("ticks[{i}].repeat"), "0", "must be positive"));
        }
        validate_reading(&step.chamber, &format!("ticks[{i}].chamber"))?;
        validate_reading(&step.outdoor, &format!("ticks[{i}].outdoor"))?;
        if let Some(supply) = &step.supply {
            validate_reading(supply, &format!("ticks[{i}].supply"))?;
        }
        validate_target(&step.target, &format!("ticks[{i}].target"))?;
    }
    Ok(())
}

fn validate_reading(reading: &ReadingDef, context: &str) -> Result<(), ValidationError> {
    temperature(&format!("{context}.temp_c"), reading.temp_c)?;
    humidity(&format!("{context}.rh_percent"), reading.rh_percent)
}

fn validate_target(target: &TargetDef, context: &str) -> Result<(), ValidationError> {
    temperature(&format!("{context}.temp_c"), target.temp_c)?;
    humidity(&format!("{context}.rh_percent"), target.rh_percent)
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() {
        return Err(invalid(field, &v.to_string(), "must be finite"));
    }
    Ok(())
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    finite(field, v)?;
    if v <= 0.0 {
        return Err(invalid(field, &v.to_string(), "must be positive"));
    }
    Ok(())
}

fn non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    finite(field, v)?;
    if v < 0.0 {
        return Err(invalid(field, &v.to_string(), "must be non-negative"));
    }
    Ok(())
}

fn fraction(field: &str, v: f64) -> Result<(), ValidationError> {
    finite(field, v)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(invalid(field, &v.to_string(), "must be in [0, 1]"));
    }
    Ok(())
}

fn temperature(field: &str, v: f64) -> Result<(), ValidationError> {
    finite(field, v)?;
    let (min, max) = TEMP_RANGE_C;
    if v < min || v > max {
        return Err(invalid(
            field,
            &v.to_string(),
            &format!("outside plausible range [{min}, {max}] °C"),
        ));
    }
    Ok(())
}

fn humidity(field: &str, v: f64) -> Result<(), ValidationError> {
    finite(field, v)?;
    if !(0.0..=100.0).contains(&v) {
        return Err(invalid(field, &v.to_string(), "RH must be in [0, 100] %"));
    }
    Ok(())
}
