//! Run configuration: controller parameters, population model, termination
//! condition, and the per-trial bundle the trial runner consumes.

use ts_core::{FrustrationFn, RateFn};
use ts_strategy::StrategyConfig;

use crate::{SimError, SimResult};

// ── ControllerConfig ──────────────────────────────────────────────────────────

/// Parameters of a single controller instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Vehicles per tick that can leave the green lane.  Releases happen
    /// once at least `1 / exit_rate` ticks have passed since the lane's last
    /// departure.
    pub exit_rate: f64,

    /// Vehicles released at each qualifying tick.
    pub departures_per_release: u32,

    /// Ticks the clock advances per controller step.
    pub step: u64,

    /// Seconds of simulated time per tick.
    pub tick_duration_secs: u32,

    /// Record per-tick [`History`][crate::History].
    pub save_history: bool,

    /// Seed for the population RNG and every per-lane RNG.
    pub seed: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            exit_rate:              0.5,
            departures_per_release: 1,
            step:                   1,
            tick_duration_secs:     1,
            save_history:           false,
            seed:                   42,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.exit_rate.is_finite() && self.exit_rate > 0.0) {
            return Err(SimError::Config(format!(
                "exit_rate must be positive and finite, got {}",
                self.exit_rate
            )));
        }
        if self.departures_per_release == 0 {
            return Err(SimError::Config("departures_per_release must be at least 1".into()));
        }
        Ok(())
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// How vehicles enter the intersection.  A run uses exactly one model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Population {
    /// `num_vehicles` arrivals are generated up front with exponential gaps
    /// and spread uniformly over `lanes` lanes.
    Prepopulated {
        lanes:                   usize,
        num_vehicles:            usize,
        arrival_rate_per_minute: f64,
    },
    /// Each lane injects Poisson arrivals from its own rate function.
    RateDriven {
        lanes: Vec<RateFn>,
    },
}

impl Population {
    pub fn lane_count(&self) -> usize {
        match self {
            Population::Prepopulated { lanes, .. } => *lanes,
            Population::RateDriven { lanes } => lanes.len(),
        }
    }

    pub fn is_rate_driven(&self) -> bool {
        matches!(self, Population::RateDriven { .. })
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.lane_count() == 0 {
            return Err(SimError::Config("an intersection needs at least one lane".into()));
        }
        if self.lane_count() > u16::MAX as usize {
            return Err(SimError::Config(format!(
                "{} lanes exceeds the maximum of {}",
                self.lane_count(),
                u16::MAX
            )));
        }
        match self {
            Population::Prepopulated { arrival_rate_per_minute, .. } => {
                if !(arrival_rate_per_minute.is_finite() && *arrival_rate_per_minute > 0.0) {
                    return Err(SimError::Config(format!(
                        "arrival_rate_per_minute must be positive, got {arrival_rate_per_minute}"
                    )));
                }
            }
            Population::RateDriven { lanes } => {
                for rate in lanes {
                    rate.validate()?;
                }
            }
        }
        Ok(())
    }
}

// ── Termination ───────────────────────────────────────────────────────────────

/// When a run stops.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Termination {
    /// No vehicle pending or queued.  Only meaningful for pre-populated
    /// runs; a rate-driven intersection never drains.
    Drained,
    /// Stop once the clock reaches `ticks`.
    Ticks { ticks: u64 },
    /// Stop after `hours` of simulated time.
    Hours { hours: f64 },
}

impl Termination {
    pub fn validate(&self, population: &Population) -> SimResult<()> {
        match self {
            Termination::Drained if population.is_rate_driven() => Err(SimError::Config(
                "rate-driven lanes never drain; use a tick or hour limit".into(),
            )),
            Termination::Hours { hours } if !(hours.is_finite() && *hours > 0.0) => {
                Err(SimError::Config(format!("hours must be positive, got {hours}")))
            }
            _ => Ok(()),
        }
    }
}

// ── TrialConfig ───────────────────────────────────────────────────────────────

/// Everything needed to run one independent trial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub controller:  ControllerConfig,
    pub population:  Population,
    pub strategy:    StrategyConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frustration: FrustrationFn,
    pub termination: Termination,
    /// Safety cap: a run that reaches this tick without meeting its
    /// termination condition fails with [`SimError::TickLimit`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_ticks:   Option<u64>,
}

impl TrialConfig {
    pub fn validate(&self) -> SimResult<()> {
        self.controller.validate()?;
        self.population.validate()?;
        self.termination.validate(&self.population)?;
        self.frustration.validate()?;
        self.strategy.validate()?;
        Ok(())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// How many trials to run and how to seed them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub trials:      u32,
    /// Root seed; trial `i` uses `trial_seed(seed, TrialId(i))`.
    pub seed:        u64,
    /// Worker threads for the `parallel` feature.  `None` uses Rayon's
    /// global pool.
    #[cfg_attr(feature = "serde", serde(default))]
    pub num_threads: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { trials: 1, seed: 42, num_threads: None }
    }
}
