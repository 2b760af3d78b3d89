//! Error types for control configuration.
//!
//! The per-tick control path never fails; these errors come only from
//! building or validating parameters.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when configuring the controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Two bands or limits that must be ordered are not.
    #[error("Band ordering violated: {what}")]
    BandOrdering { what: &'static str },

    /// Numeric check from the core crate.
    #[error(transparent)]
    Core(#[from] cc_core::CoreError),
}
