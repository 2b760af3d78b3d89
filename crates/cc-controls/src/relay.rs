//! Relay edge detection.
//!
//! The I/O layer only needs to hear about a relay when its commanded state
//! changes.

use serde::{Deserialize, Serialize};

use crate::coordinator::ActuatorCommands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayAction {
    TurnOn,
    TurnOff,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayChannel {
    /// Last commanded state; `None` before the first command.
    pub last: Option<bool>,
}

impl RelayChannel {
    pub fn command(&mut self, desired: bool) -> Option<RelayAction> {
        if self.last == Some(desired) {
            return None;
        }
        self.last = Some(desired);
        Some(if desired {
            RelayAction::TurnOn
        } else {
            RelayAction::TurnOff
        })
    }
}

/// A relay whose commanded state changed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayEvent {
    pub relay: &'static str,
    pub action: RelayAction,
}

/// One channel per field of [`ActuatorCommands`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayBank {
    pub channels: [RelayChannel; 9],
}

impl RelayBank {
    /// Events for every relay whose state changed, in `RELAY_NAMES` order.
    pub fn apply(&mut self, commands: &ActuatorCommands) -> Vec<RelayEvent> {
        self.channels
            .iter_mut()
            .zip(commands.as_array())
            .zip(ActuatorCommands::RELAY_NAMES)
            .filter_map(|((channel, desired), relay)| {
                channel
                    .command(desired)
                    .map(|action| RelayEvent { relay, action })
            })
            .collect()
    }
}
