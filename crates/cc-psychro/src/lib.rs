//! cc-psychro: moist-air property calculations.
//!
//! Provides:
//! - Magnus-Tetens saturation vapor pressure
//! - Absolute humidity from temperature and RH, and its inverse
//! - Dew point (with a sentinel for non-positive RH)
//! - `AirState`, the raw-reading to float boundary used by the controller
//!
//! # Example
//!
//! ```
//! use cc_psychro::{AirState, absolute_humidity};
//!
//! let ah = absolute_humidity(15.0, 75.0);
//! assert!((ah - 9.61).abs() < 0.01);
//!
//! let chamber = AirState::from_raw(150, 750);
//! assert!((chamber.absolute_humidity() - ah).abs() < 1e-12);
//! ```

pub mod error;
pub mod psychro;
pub mod state;

pub use error::{PsychroError, PsychroResult};
pub use psychro::{
    DEW_POINT_SENTINEL, MAGNUS_A, MAGNUS_B, MAGNUS_C, WATER_VAPOR_K, absolute_humidity, dew_point,
    rh_from_absolute_humidity, saturation_vapor_pressure,
};
pub use state::{AirState, PlausibleRange};
