//! Scenario file format and the built-in comparison set.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ts_sim::{RunConfig, TrialConfig};

/// A named trial configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name:  String,
    #[serde(flatten)]
    pub trial: TrialConfig,
}

/// Top-level JSON document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub run:                   RunConfig,
    /// Lane rows are written every this many ticks for trial 0 of each
    /// scenario when an output directory is given.  0 disables them.
    #[serde(default = "default_interval")]
    pub output_interval_ticks: u64,
    pub scenarios:             Vec<Scenario>,
}

fn default_interval() -> u64 {
    10
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN).context("parsing built-in scenarios")
    }
}

// Three lanes, 1,000 vehicles at 30/min, one departure every 2 ticks: the
// three switching policies side by side, plus a rush-hour day for the
// adaptive one.
const BUILTIN: &str = r#"{
  "run": { "trials": 20, "seed": 42 },
  "output_interval_ticks": 10,
  "scenarios": [
    {
      "name": "constant-30",
      "controller": { "exit_rate": 0.5 },
      "population": { "kind": "prepopulated", "lanes": 3, "num_vehicles": 1000, "arrival_rate_per_minute": 30.0 },
      "strategy": { "kind": "constant", "wait_time": 30 },
      "termination": { "kind": "drained" },
      "max_ticks": 1000000
    },
    {
      "name": "idle-30-5",
      "controller": { "exit_rate": 0.5 },
      "population": { "kind": "prepopulated", "lanes": 3, "num_vehicles": 1000, "arrival_rate_per_minute": 30.0 },
      "strategy": { "kind": "idle", "wait_time": 30, "idle_time": 5 },
      "termination": { "kind": "drained" },
      "max_ticks": 1000000
    },
    {
      "name": "snapshot-600-90",
      "controller": { "exit_rate": 0.5 },
      "population": { "kind": "prepopulated", "lanes": 3, "num_vehicles": 1000, "arrival_rate_per_minute": 30.0 },
      "strategy": { "kind": "snapshot", "rate_lookback": 600, "loop_duration": 90 },
      "termination": { "kind": "drained" },
      "max_ticks": 1000000
    },
    {
      "name": "snapshot-rush-hour",
      "controller": { "exit_rate": 0.5, "tick_duration_secs": 1 },
      "population": {
        "kind": "rate_driven",
        "lanes": [
          { "kind": "rush_hour", "base": 4.0, "peaks": [ { "hour": 8.0, "height": 12.0, "width": 1.0 } ] },
          { "kind": "rush_hour", "base": 4.0, "peaks": [ { "hour": 17.0, "height": 12.0, "width": 1.0 } ] },
          { "kind": "constant", "per_minute": 3.0 }
        ]
      },
      "strategy": { "kind": "snapshot", "rate_lookback": 900, "loop_duration": 120 },
      "frustration": { "kind": "exponential", "k": 0.2 },
      "termination": { "kind": "hours", "hours": 24.0 }
    }
  ]
}"#;
