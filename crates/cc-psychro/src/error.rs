//! Psychrometric input errors.

use cc_core::CoreError;
use thiserror::Error;

/// Result type for psychrometric validation.
pub type PsychroResult<T> = Result<T, PsychroError>;

/// Physically implausible inputs rejected before they reach the control math.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsychroError {
    /// Relative humidity outside [0, 100] %.
    #[error("Relative humidity out of range: {rh_percent} %")]
    HumidityOutOfRange { rh_percent: f64 },

    /// Temperature outside the configured plausible window.
    #[error("Temperature {temp_c} °C outside plausible range [{min_c}, {max_c}]")]
    TemperatureOutOfRange { temp_c: f64, min_c: f64, max_c: f64 },

    /// NaN or infinity.
    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },
}

impl From<PsychroError> for CoreError {
    fn from(err: PsychroError) -> Self {
        match err {
            PsychroError::HumidityOutOfRange { rh_percent } => CoreError::OutOfRange {
                what: "relative humidity",
                value: rh_percent,
                min: 0.0,
                max: 100.0,
            },
            PsychroError::TemperatureOutOfRange {
                temp_c,
                min_c,
                max_c,
            } => CoreError::OutOfRange {
                what: "temperature",
                value: temp_c,
                min: min_c,
                max: max_c,
            },
            PsychroError::NonFinite { what } => CoreError::NonFinite {
                what,
                value: f64::NAN,
            },
        }
    }
}
