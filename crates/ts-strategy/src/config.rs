//! Validated strategy selection.
//!
//! Strategies are chosen from explicit configuration, never by name lookup
//! at runtime: a [`StrategyConfig`] is validated and turned into the closed
//! [`Strategy`] enum, which dispatches to the concrete implementation.

use ts_lane::Lane;

use crate::{
    ConstantStrategy, IdleStrategy, OptimizeOptions, SnapshotStrategy, StrategyError,
    StrategyResult, SwitchContext, SwitchStrategy,
};

/// Strategy parameters, one variant per policy.  All durations are in ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StrategyConfig {
    Constant {
        wait_time: u64,
    },
    Idle {
        wait_time: u64,
        idle_time: u64,
    },
    Snapshot {
        rate_lookback:  u64,
        loop_duration:  u64,
        /// Solver tolerance; default 1e-9.
        tolerance:      Option<f64>,
        /// Solver iteration cap; default 10,000.
        max_iterations: Option<u32>,
    },
}

impl StrategyConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::Constant { .. } => "constant",
            StrategyConfig::Idle { .. } => "idle",
            StrategyConfig::Snapshot { .. } => "snapshot",
        }
    }

    pub fn validate(&self) -> StrategyResult<()> {
        let positive = |name: &str, v: u64| {
            if v == 0 {
                Err(StrategyError::Config(format!("{} strategy: `{name}` must be > 0", self.name())))
            } else {
                Ok(())
            }
        };
        match *self {
            StrategyConfig::Constant { wait_time } => positive("wait_time", wait_time),
            StrategyConfig::Idle { wait_time, idle_time } => {
                positive("wait_time", wait_time)?;
                positive("idle_time", idle_time)
            }
            StrategyConfig::Snapshot { rate_lookback, loop_duration, tolerance, max_iterations } => {
                positive("rate_lookback", rate_lookback)?;
                positive("loop_duration", loop_duration)?;
                if let Some(tol) = tolerance {
                    if !(tol.is_finite() && tol > 0.0) {
                        return Err(StrategyError::Config(format!(
                            "snapshot strategy: `tolerance` must be positive, got {tol}"
                        )));
                    }
                }
                if max_iterations == Some(0) {
                    return Err(StrategyError::Config(
                        "snapshot strategy: `max_iterations` must be > 0".into(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Validate and construct the strategy.
    pub fn build(&self) -> StrategyResult<Strategy> {
        self.validate()?;
        Ok(match *self {
            StrategyConfig::Constant { wait_time } => {
                Strategy::Constant(ConstantStrategy::new(wait_time))
            }
            StrategyConfig::Idle { wait_time, idle_time } => {
                Strategy::Idle(IdleStrategy::new(wait_time, idle_time))
            }
            StrategyConfig::Snapshot { rate_lookback, loop_duration, tolerance, max_iterations } => {
                let defaults = OptimizeOptions::default();
                let options = OptimizeOptions {
                    tolerance:      tolerance.unwrap_or(defaults.tolerance),
                    max_iterations: max_iterations.unwrap_or(defaults.max_iterations),
                };
                Strategy::Snapshot(
                    SnapshotStrategy::new(rate_lookback, loop_duration)?.with_options(options),
                )
            }
        })
    }
}

/// The closed set of built-in strategies.
#[derive(Clone, Debug)]
pub enum Strategy {
    Constant(ConstantStrategy),
    Idle(IdleStrategy),
    Snapshot(SnapshotStrategy),
}

impl SwitchStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Constant(s) => s.name(),
            Strategy::Idle(s) => s.name(),
            Strategy::Snapshot(s) => s.name(),
        }
    }

    fn init(&mut self, lanes: &mut [Lane]) {
        match self {
            Strategy::Constant(s) => s.init(lanes),
            Strategy::Idle(s) => s.init(lanes),
            Strategy::Snapshot(s) => s.init(lanes),
        }
    }

    fn should_switch(&mut self, ctx: &mut SwitchContext<'_>) -> bool {
        match self {
            Strategy::Constant(s) => s.should_switch(ctx),
            Strategy::Idle(s) => s.should_switch(ctx),
            Strategy::Snapshot(s) => s.should_switch(ctx),
        }
    }
}
