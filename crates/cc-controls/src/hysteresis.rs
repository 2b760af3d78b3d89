//! Two-threshold sticky boolean.
//!
//! Every on/off decision in the controller is built from [`hysteresis`]:
//! above `target + delta_hi` the output is on, below `target - delta_lo` it is
//! off, and in between it keeps whatever it was.

use serde::{Deserialize, Serialize};

/// Values a threshold can be offset from. Raw integers saturate at the
/// type bounds instead of wrapping.
pub trait Threshold: Copy + PartialOrd {
    fn raised_by(self, delta: Self) -> Self;
    fn lowered_by(self, delta: Self) -> Self;
}

impl Threshold for i32 {
    fn raised_by(self, delta: Self) -> Self {
        self.saturating_add(delta)
    }

    fn lowered_by(self, delta: Self) -> Self {
        self.saturating_sub(delta)
    }
}

impl Threshold for f64 {
    fn raised_by(self, delta: Self) -> Self {
        self + delta
    }

    fn lowered_by(self, delta: Self) -> Self {
        self - delta
    }
}

/// Sticky threshold comparison. Both thresholds are exclusive.
pub fn hysteresis<T: Threshold>(
    measured: T,
    target: T,
    delta_hi: T,
    delta_lo: T,
    current_state: bool,
) -> bool {
    if measured > target.raised_by(delta_hi) {
        true
    } else if measured < target.lowered_by(delta_lo) {
        false
    } else {
        current_state
    }
}

/// Fixed pair of offsets for the legacy single-loop (v1) controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HysteresisBand {
    pub delta_hi_raw: i32,
    pub delta_lo_raw: i32,
}

impl HysteresisBand {
    pub const fn new(delta_hi_raw: i32, delta_lo_raw: i32) -> Self {
        Self {
            delta_hi_raw,
            delta_lo_raw,
        }
    }

    /// Output is on while `measured` sits above the band around `target`.
    pub fn above(&self, measured: i32, target: i32, state: bool) -> bool {
        hysteresis(measured, target, self.delta_hi_raw, self.delta_lo_raw, state)
    }

    /// Mirror image: on while `measured` sits below the band.
    pub fn below(&self, measured: i32, target: i32, state: bool) -> bool {
        hysteresis(target, measured, self.delta_hi_raw, self.delta_lo_raw, state)
    }
}
