//! Rate-adaptive strategy: re-plan green shares once per rotation.
//!
//! At the first tick of lane 0's green phase, every lane's recent arrival
//! rate is estimated from the vehicles that arrived in the trailing
//! `rate_lookback` ticks.  The green-share problem (see [`crate::optimize`])
//! is solved for those rates and each lane's `wait_time` becomes
//! `round(shareᵢ · loop_duration)`.  Between re-plans the strategy behaves
//! like [`ConstantStrategy`][crate::ConstantStrategy] with per-lane
//! durations.
//!
//! If the solver fails the cycle falls back to an equal split, so every lane
//! always has a defined `wait_time`.

use log::{debug, warn};
use ts_core::Tick;
use ts_lane::Lane;

use crate::optimize::{equal_split, solve_allocation};
use crate::{OptimizeOptions, StrategyError, StrategyResult, SwitchContext, SwitchStrategy};

#[derive(Clone, Debug)]
pub struct SnapshotStrategy {
    /// Trailing window (ticks) for arrival-rate estimates.
    pub rate_lookback: u64,
    /// Target length (ticks) of one full rotation.
    pub loop_duration: u64,
    pub options:       OptimizeOptions,

    /// Green-on tick of lane 0 that was last planned for.
    planned_for: Option<Tick>,
    shares:      Vec<f64>,
    fallbacks:   u32,
}

impl SnapshotStrategy {
    pub fn new(rate_lookback: u64, loop_duration: u64) -> StrategyResult<Self> {
        if rate_lookback == 0 {
            return Err(StrategyError::Config("rate_lookback must be > 0".into()));
        }
        if loop_duration == 0 {
            return Err(StrategyError::Config("loop_duration must be > 0".into()));
        }
        Ok(Self {
            rate_lookback,
            loop_duration,
            options: OptimizeOptions::default(),
            planned_for: None,
            shares: Vec::new(),
            fallbacks: 0,
        })
    }

    pub fn with_options(mut self, options: OptimizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Shares chosen at the most recent re-plan.
    pub fn shares(&self) -> &[f64] {
        &self.shares
    }

    /// Number of cycles that fell back to the equal split.
    pub fn fallbacks(&self) -> u32 {
        self.fallbacks
    }

    fn apply_shares(&mut self, lanes: &mut [Lane], shares: Vec<f64>) {
        for (lane, &share) in lanes.iter_mut().zip(&shares) {
            lane.wait_time = (share * self.loop_duration as f64).round() as u64;
        }
        self.shares = shares;
    }

    fn plan(&mut self, ctx: &mut SwitchContext<'_>) {
        let clock = ctx.clock;
        let lookback = self.rate_lookback;
        let per_minute = clock.ticks_per_minute() / lookback as f64;
        let rates: Vec<f64> = ctx
            .lanes
            .iter_mut()
            .map(|lane| {
                let rate = lane.arrivals_within(clock, lookback) as f64 * per_minute;
                lane.rate_estimate = Some(rate);
                rate
            })
            .collect();

        let capacity = ctx.exit_rate * self.loop_duration as f64;
        let shares = match solve_allocation(&rates, capacity, &self.options) {
            Ok(allocation) => {
                debug!(
                    "{}: rates {:?} → shares {:?} (penalty {:.3}, {} iterations)",
                    clock, rates, allocation.shares, allocation.penalty, allocation.iterations,
                );
                allocation.shares
            }
            Err(e) => {
                warn!("{clock}: green-share solve failed ({e}); using equal split");
                self.fallbacks += 1;
                equal_split(ctx.lanes.len())
            }
        };
        self.apply_shares(ctx.lanes, shares);
    }
}

impl SwitchStrategy for SnapshotStrategy {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn init(&mut self, lanes: &mut [Lane]) {
        let shares = equal_split(lanes.len());
        self.apply_shares(lanes, shares);
    }

    fn should_switch(&mut self, ctx: &mut SwitchContext<'_>) -> bool {
        if ctx.active.index() == 0 {
            let green_at = ctx.active_lane().active_since();
            if green_at.is_some() && green_at != self.planned_for {
                self.plan(ctx);
                self.planned_for = green_at;
            }
        }
        ctx.green_elapsed() > ctx.active_lane().wait_time
    }
}
