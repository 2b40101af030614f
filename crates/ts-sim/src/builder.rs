//! Fluent builder for constructing a [`Controller`].

use log::debug;
use ts_core::{FrustrationFn, LaneId, LaneRng, SimClock, SimRng};
use ts_lane::{Lane, populate_lanes};
use ts_strategy::SwitchStrategy;

use crate::{Controller, ControllerConfig, History, Population, SimError, SimResult};

/// Fluent builder for [`Controller<S>`].
///
/// # Required inputs
///
/// - [`ControllerConfig`] — exit rate, clock step, seed, …
/// - [`Population`] — lane count and arrival model
/// - `S: SwitchStrategy` — the switching policy
///
/// # Optional inputs
///
/// | Method             | Default                        |
/// |--------------------|--------------------------------|
/// | `.frustration(f)`  | `FrustrationFn::Quadratic`     |
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = ControllerBuilder::new(config, population, IdleStrategy::new(30, 5))
///     .frustration(FrustrationFn::Exponential { k: 0.5 })
///     .build()?;
/// controller.run(Termination::Drained, None, &mut NoopObserver)?;
/// ```
pub struct ControllerBuilder<S: SwitchStrategy> {
    config:      ControllerConfig,
    population:  Population,
    strategy:    S,
    frustration: FrustrationFn,
}

impl<S: SwitchStrategy> ControllerBuilder<S> {
    pub fn new(config: ControllerConfig, population: Population, strategy: S) -> Self {
        Self { config, population, strategy, frustration: FrustrationFn::default() }
    }

    /// Frustration function stamped onto every vehicle.
    pub fn frustration(mut self, frustration: FrustrationFn) -> Self {
        self.frustration = frustration;
        self
    }

    /// Validate inputs, create and populate the lanes, and return a
    /// controller at tick 0 with lane 0 green.
    pub fn build(self) -> SimResult<Controller<S>> {
        let Self { config, population, mut strategy, frustration } = self;

        // ── Validate ──────────────────────────────────────────────────────
        config.validate()?;
        population.validate()?;
        frustration.validate()?;
        let clock = SimClock::new(config.step, config.tick_duration_secs)?;

        // ── Lanes and per-lane RNGs ───────────────────────────────────────
        let lane_count = population.lane_count();
        let mut lanes = Vec::with_capacity(lane_count);
        let mut lane_rngs = Vec::with_capacity(lane_count);
        for i in 0..lane_count {
            let id = LaneId::try_from(i)
                .map_err(|_| SimError::Config(format!("lane index {i} out of range")))?;
            let lane = match &population {
                Population::Prepopulated { .. } => Lane::prepopulated(id, frustration),
                Population::RateDriven { lanes } => Lane::rate_driven(id, lanes[i].clone(), frustration),
            };
            lanes.push(lane);
            lane_rngs.push(LaneRng::new(config.seed, id));
        }

        if let Population::Prepopulated { num_vehicles, arrival_rate_per_minute, .. } = &population {
            let mut rng = SimRng::new(config.seed);
            populate_lanes(&mut lanes, *num_vehicles, *arrival_rate_per_minute, &clock, &mut rng)?;
        }

        // ── Initial signal state ──────────────────────────────────────────
        strategy.init(&mut lanes);
        let active = LaneId(0);
        lanes[active.index()].set_green(&clock);

        debug!(
            "controller built: {} lanes, strategy {}, exit_rate {}, seed {}",
            lane_count,
            strategy.name(),
            config.exit_rate,
            config.seed,
        );

        let history = config.save_history.then(|| History::new(lane_count));
        Ok(Controller::from_parts(config, clock, lanes, lane_rngs, active, strategy, history))
    }
}
