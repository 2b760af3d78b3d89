//! Start-up lockout.

use serde::{Deserialize, Serialize};

use crate::coordinator::ActuatorCommands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeInitConfig {
    pub duration_s: u32,
}

impl Default for SafeInitConfig {
    fn default() -> Self {
        Self { duration_s: 32 }
    }
}

/// Elapsed time since (re)start plus the one-way completion latch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitState {
    pub elapsed_seconds: u32,
    pub complete: bool,
}

impl InitState {
    /// Record the elapsed time. Returns `true` on the tick the latch closes.
    pub fn update(&mut self, elapsed_seconds: u32, config: &SafeInitConfig) -> bool {
        self.elapsed_seconds = elapsed_seconds;
        if !self.complete && elapsed_seconds >= config.duration_s {
            self.complete = true;
            return true;
        }
        false
    }

    /// Every output off until the latch closes.
    pub fn gate(&self, commands: ActuatorCommands) -> ActuatorCommands {
        if self.complete {
            commands
        } else {
            ActuatorCommands::all_off()
        }
    }
}
