//! Shared application service layer for the chamber climate controller.
//!
//! Front ends go through this crate for site management, compiling chamber
//! definitions into controller configs, replaying scenarios and querying
//! replay records.

pub mod error;
pub mod project_service;
pub mod query;
pub mod replay_service;
pub mod runtime_compile;

pub use error::{AppError, AppResult};
pub use project_service::{
    ChamberSummary, get_chamber, list_chambers, load_scenario, load_site, save_site, validate_site,
};
pub use query::{ReplaySummary, get_replay_summary, relay_series, records_to_csv};
pub use replay_service::{ReplayRecord, run_scenario};
pub use runtime_compile::{c_to_raw, compile_chamber, default_target, target_to_raw};
