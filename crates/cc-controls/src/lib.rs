//! Decision core of the chamber climate controller.
//!
//! One [`ChamberController`] per chamber runs a synchronous tick: sensor
//! readings, target and mode flags go in, an [`ActuatorCommands`] set and a
//! supply-air temperature target come out.
//!
//! # Architecture
//!
//! - Two nested loops share the same state machines with different bands:
//!   the chamber (outer) loop drives the relays, the supply (inner) loop
//!   tracks the supply-air target.
//! - Temperature uses directional hysteresis on raw ×10 integers.
//! - Humidity is classified FINE / HUMID / DRY on absolute humidity.
//! - Arbitration, economizer and coordinator are pure functions of the
//!   tick's values; only [`ControllerState`] persists.
//! - Readings outside the plausible window count as failed reads, so the
//!   psychrometric math only ever sees sane values.
//! - The tick never fails. Configuration is validated up front.
//!
//! # Example
//!
//! ```
//! use cc_controls::{
//!     AirReading, ChamberController, ControlTarget, ControllerConfig, ModeFlags, TickInput,
//! };
//!
//! let mut controller = ChamberController::new(ControllerConfig::default()).unwrap();
//! let input = TickInput {
//!     chamber: Some(AirReading::new(170, 650)),
//!     supply: Some(AirReading::new(120, 900)),
//!     outdoor: Some(AirReading::new(250, 600)),
//!     target: ControlTarget::new(150, 750),
//!     modes: ModeFlags { summer_mode: true, ..ModeFlags::default() },
//!     elapsed_seconds: 60,
//! };
//! let out = controller.tick(&input);
//! assert!(out.commands.relay_cool);
//! assert!(!out.commands.relay_warm);
//! ```

pub mod arbitration;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod economizer;
pub mod error;
pub mod humidity;
pub mod hysteresis;
pub mod relay;
pub mod safe_init;
pub mod sensor;
pub mod signal;
pub mod sleep;
pub mod supply;
pub mod temperature;
pub mod warmup;

pub use arbitration::{ArbitratedDemand, ArbitrationConfig, better_cold_than_dry};
pub use config::ControllerConfig;
pub use controller::{ChamberController, ControlDecision, ControllerState, TickOutput};
pub use coordinator::{
    ActuatorCommands, CoordinatorConfig, CoordinatorInput, coordinate, water_cooling_backup,
};
pub use economizer::{
    EconomizerConfig, EconomizerVariant, MixingInput, OutdoorAssessment, assess_outdoor_air, evaluate_outdoor_benefit, is_outdoor_beneficial,
};
pub use error::{ControlError, ControlResult};
pub use humidity::{
    HumidityBand, HumidityMode, HumidityThresholds, is_inside_chamber_deadzone,
    is_inside_supply_deadzone,
};
pub use hysteresis::{HysteresisBand, Threshold, hysteresis};
pub use relay::{RelayAction, RelayBank, RelayChannel, RelayEvent};
pub use safe_init::{InitState, SafeInitConfig};
pub use sensor::{SensorConfig, SensorFaultCounter, SensorGuard};
pub use signal::{AirReading, ControlTarget, ModeFlags, SensorReading, TickInput};
pub use sleep::{SleepCycleConfig, SleepCycleState};
pub use supply::{
    SupplyTargetConfig, clamp_supply_target, supply_target_inside_deadzone,
    supply_target_outside_deadzone,
};
pub use temperature::{TemperatureBand, TemperatureState, temperature_control};
pub use warmup::WarmupTracker;
