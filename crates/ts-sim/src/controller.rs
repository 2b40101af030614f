//! The intersection controller and its tick state machine.

use log::{debug, trace};
use ts_core::{LaneId, LaneRng, SimClock, Tick};
use ts_lane::{Lane, LaneArrivals};
use ts_strategy::{SwitchContext, SwitchStrategy};

use crate::{ControllerConfig, History, SimError, SimObserver, SimResult, Termination};

// ── Controller ────────────────────────────────────────────────────────────────

/// Owns the clock, the lanes and the strategy, and advances them one tick
/// at a time.
///
/// Each [`step`][Self::step] runs, in order: clock advance, admission on
/// every lane, release from the green lane, the switch decision, and
/// history capture.  Exactly one lane is green between steps.
///
/// Create via [`ControllerBuilder`][crate::ControllerBuilder].
pub struct Controller<S: SwitchStrategy> {
    /// Configuration the controller was built with.
    pub config: ControllerConfig,

    clock:      SimClock,
    lanes:      Vec<Lane>,
    /// Per-lane arrival RNGs, parallel to `lanes`.
    lane_rngs:  Vec<LaneRng>,
    active:     LaneId,
    strategy:   S,
    history:    Option<History>,
    switch_log: Vec<Tick>,
}

impl<S: SwitchStrategy> Controller<S> {
    pub(crate) fn from_parts(
        config:    ControllerConfig,
        clock:     SimClock,
        lanes:     Vec<Lane>,
        lane_rngs: Vec<LaneRng>,
        active:    LaneId,
        strategy:  S,
        history:   Option<History>,
    ) -> Self {
        Self {
            config,
            clock,
            lanes,
            lane_rngs,
            active,
            strategy,
            history,
            switch_log: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(id.index())
    }

    /// Id of the lane that is currently green.
    pub fn active_lane_id(&self) -> LaneId {
        self.active
    }

    pub fn active_lane(&self) -> &Lane {
        &self.lanes[self.active.index()]
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// Ticks at which the light changed, in order.
    pub fn switch_log(&self) -> &[Tick] {
        &self.switch_log
    }

    // ── Metrics ───────────────────────────────────────────────────────────

    pub fn num_pending(&self) -> usize {
        self.lanes.iter().map(Lane::num_pending).sum()
    }

    pub fn num_active(&self) -> usize {
        self.lanes.iter().map(Lane::num_active).sum()
    }

    pub fn num_passed(&self) -> usize {
        self.lanes.iter().map(Lane::num_passed).sum()
    }

    /// Vehicles created so far, in any state.
    pub fn num_vehicles(&self) -> usize {
        self.lanes.iter().map(Lane::total_assigned).sum()
    }

    pub fn active_frustration(&self) -> f64 {
        self.lanes.iter().map(|l| l.active_frustration(&self.clock)).sum()
    }

    pub fn passed_frustration(&self) -> f64 {
        self.lanes.iter().map(|l| l.passed_frustration(&self.clock)).sum()
    }

    pub fn total_frustration(&self) -> f64 {
        self.active_frustration() + self.passed_frustration()
    }

    /// Total frustration (queued vehicles included) per departed vehicle.
    pub fn average_frustration(&self) -> SimResult<f64> {
        match self.num_passed() {
            0 => Err(SimError::NoCompletedVehicles),
            n => Ok(self.total_frustration() / n as f64),
        }
    }

    /// No vehicle is waiting to arrive or queued at the light.
    pub fn is_drained(&self) -> bool {
        self.num_pending() == 0 && self.num_active() == 0
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the intersection by one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: clock ────────────────────────────────────────────────
        self.clock.advance();
        let now = self.clock.now();
        observer.on_tick_start(now);

        // ── Phase 2: admission on every lane ──────────────────────────────
        let mut admitted = 0;
        for (lane, rng) in self.lanes.iter_mut().zip(self.lane_rngs.iter_mut()) {
            admitted += lane.admit(&self.clock, rng);
        }

        // ── Phase 3: release from the green lane ──────────────────────────
        let released = self.release()?;

        // ── Phase 4: switch decision ──────────────────────────────────────
        let mut ctx =
            SwitchContext::new(&self.clock, &mut self.lanes, self.active, self.config.exit_rate);
        if self.strategy.should_switch(&mut ctx) {
            self.rotate(observer);
        }

        // ── Phase 5: history ──────────────────────────────────────────────
        if let Some(history) = &mut self.history {
            history.record(now, &self.lanes, self.active);
        }

        trace!(
            "{now}: admitted {admitted}, released {released}, green {}, queued {}",
            self.active,
            self.num_active()
        );
        observer.on_tick_end(&self.clock, &self.lanes, self.active);
        Ok(())
    }

    /// Step until `termination` holds.
    ///
    /// `max_ticks` is a safety cap: reaching it first is an error.  Returns
    /// the final tick.
    pub fn run<O: SimObserver>(
        &mut self,
        termination: Termination,
        max_ticks:   Option<u64>,
        observer:    &mut O,
    ) -> SimResult<Tick> {
        let rate_driven = self
            .lanes
            .iter()
            .any(|l| matches!(l.arrivals(), LaneArrivals::RateDriven(_)));
        match termination {
            Termination::Drained if rate_driven => {
                return Err(SimError::Config(
                    "rate-driven lanes never drain; use a tick or hour limit".into(),
                ));
            }
            Termination::Hours { hours } if !(hours.is_finite() && hours > 0.0) => {
                return Err(SimError::Config(format!("hours must be positive, got {hours}")));
            }
            _ => {}
        }

        loop {
            let done = match termination {
                Termination::Drained => self.is_drained(),
                Termination::Ticks { ticks } => self.clock.now().0 >= ticks,
                Termination::Hours { hours } => {
                    self.clock.now().0 >= self.clock.ticks_for_hours(hours)
                }
            };
            if done {
                break;
            }
            if let Some(limit) = max_ticks {
                if self.clock.now().0 >= limit {
                    return Err(SimError::TickLimit(limit));
                }
            }
            self.step(observer)?;
        }

        let end = self.clock.now();
        debug!(
            "run finished at {}: {} passed, {} queued, {} switches",
            self.clock,
            self.num_passed(),
            self.num_active(),
            self.switch_log.len()
        );
        observer.on_sim_end(end);
        Ok(end)
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Release up to `departures_per_release` vehicles once the release gap
    /// has elapsed.  A lane that has never released is always eligible.
    fn release(&mut self) -> SimResult<usize> {
        let gap = 1.0 / self.config.exit_rate;
        let lane = &mut self.lanes[self.active.index()];
        if lane.num_active() == 0 || (self.clock.elapsed_since_mark(lane.last_exit()) as f64) < gap {
            return Ok(0);
        }

        let mut released = 0;
        for _ in 0..self.config.departures_per_release {
            match lane.drive_one(&self.clock)? {
                Some(_) => released += 1,
                None => break,
            }
        }
        Ok(released)
    }

    /// Turn the green lane red and the next lane (round-robin) green.
    fn rotate<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.now();
        let from = self.active;
        let to = LaneId(((from.index() + 1) % self.lanes.len()) as u16);

        self.lanes[from.index()].set_red(&self.clock);
        self.lanes[to.index()].set_green(&self.clock);
        self.active = to;
        self.switch_log.push(now);
        if let Some(history) = &mut self.history {
            history.record_switch(now);
        }

        debug!("{now}: switch {from} -> {to}");
        observer.on_switch(now, from, to);
    }
}
