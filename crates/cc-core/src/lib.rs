//! cc-core: numeric foundation for the chamber climate controller.
//!
//! Contains:
//! - numeric (Real, finiteness/range checks, half-away rounding)
//! - units (raw ×10 wire scale and uom temperature helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
