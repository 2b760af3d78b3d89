//! Scenario files: tick sequences replayed through a chamber controller.

use serde::{Deserialize, Serialize};

use crate::schema::TargetDef;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub ticks: Vec<ScenarioStep>,
}

/// One block of identical ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioStep {
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    pub chamber: ReadingDef,
    /// Absent means the supply sensor read failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply: Option<ReadingDef>,
    pub outdoor: ReadingDef,
    pub target: TargetDef,
    #[serde(default)]
    pub summer_mode: bool,
    #[serde(default)]
    pub humi_save_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_requested: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReadingDef {
    pub temp_c: f64,
    pub rh_percent: f64,
}

fn default_repeat() -> u32 {
    1
}

impl Scenario {
    /// Total ticks after expanding `repeat`.
    pub fn tick_count(&self) -> u64 {
        self.ticks.iter().map(|s| u64::from(s.repeat)).sum()
    }

    /// Steps expanded one entry per tick.
    pub fn expanded(&self) -> impl Iterator<Item = &ScenarioStep> {
        self.ticks
            .iter()
            .flat_map(|s| std::iter::repeat_n(s, s.repeat as usize))
    }
}
