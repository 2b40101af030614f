//! `Lane` — an ordered queue of vehicles behind one traffic light.
//!
//! # Queues
//!
//! | Queue     | Order            | Contents                                  |
//! |-----------|------------------|-------------------------------------------|
//! | `pending` | by arrival tick  | generated up front, not yet arrived       |
//! | `active`  | by arrival tick  | waiting at the light; front departs first |
//! | `passed`  | by departure     | departed, kept for final statistics       |
//!
//! Departures are strictly FIFO, so `passed` is also ordered by arrival.
//! Both properties let [`Lane::arrivals_within`] scan newest-first and stop
//! at the first vehicle outside the lookback window.

use std::collections::VecDeque;

use ts_core::{FrustrationFn, LaneId, LaneRng, RateFn, SimClock, Tick, VehicleId};

use crate::{LaneError, LaneResult, Vehicle};

// ── LaneArrivals ──────────────────────────────────────────────────────────────

/// How vehicles reach a lane.  Fixed for the lifetime of the lane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneArrivals {
    /// Vehicles are generated before the run and wait in `pending`.
    Prepopulated,
    /// Each tick, `Poisson(rate(hour) · step / ticks_per_minute)` vehicles
    /// arrive directly into `active`.
    RateDriven(RateFn),
}

// ── Lane ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Lane {
    pub id: LaneId,

    arrivals: LaneArrivals,
    frustration_fn: FrustrationFn,

    pending: VecDeque<Vehicle>,
    active: VecDeque<Vehicle>,
    passed: Vec<Vehicle>,

    is_green: bool,
    /// Tick the light last turned green.  `None` = never (−∞).
    active_since: Option<Tick>,
    /// Tick the light last turned red.  `None` = never.
    last_red: Option<Tick>,
    /// Tick of the last departure.  `None` = never (−∞).
    last_exit: Option<Tick>,

    /// Target green duration in ticks.  Written by adaptive strategies.
    pub wait_time: u64,
    /// Latest arrival-rate estimate (vehicles/minute), if a strategy made one.
    pub rate_estimate: Option<f64>,

    /// Vehicles ever assigned to this lane (pending + active + passed).
    total_assigned: usize,
}

impl Lane {
    pub fn new(id: LaneId, arrivals: LaneArrivals, frustration_fn: FrustrationFn) -> Self {
        Self {
            id,
            arrivals,
            frustration_fn,
            pending: VecDeque::new(),
            active: VecDeque::new(),
            passed: Vec::new(),
            is_green: false,
            active_since: None,
            last_red: None,
            last_exit: None,
            wait_time: 0,
            rate_estimate: None,
            total_assigned: 0,
        }
    }

    pub fn prepopulated(id: LaneId, frustration_fn: FrustrationFn) -> Self {
        Self::new(id, LaneArrivals::Prepopulated, frustration_fn)
    }

    pub fn rate_driven(id: LaneId, rate: RateFn, frustration_fn: FrustrationFn) -> Self {
        Self::new(id, LaneArrivals::RateDriven(rate), frustration_fn)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn arrivals(&self) -> &LaneArrivals {
        &self.arrivals
    }

    #[inline]
    pub fn frustration_fn(&self) -> FrustrationFn {
        self.frustration_fn
    }

    #[inline]
    pub fn is_green(&self) -> bool {
        self.is_green
    }

    #[inline]
    pub fn active_since(&self) -> Option<Tick> {
        self.active_since
    }

    #[inline]
    pub fn last_red(&self) -> Option<Tick> {
        self.last_red
    }

    #[inline]
    pub fn last_exit(&self) -> Option<Tick> {
        self.last_exit
    }

    /// The later of the green-on tick and the last departure: the lane has
    /// released nothing since this tick.
    #[inline]
    pub fn idle_since(&self) -> Option<Tick> {
        self.active_since.max(self.last_exit)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Vehicle> {
        self.pending.iter()
    }

    /// The latest-arriving vehicle still pending.
    pub fn last_pending(&self) -> Option<&Vehicle> {
        self.pending.back()
    }

    pub fn active(&self) -> impl Iterator<Item = &Vehicle> {
        self.active.iter()
    }

    pub fn passed(&self) -> &[Vehicle] {
        &self.passed
    }

    #[inline]
    pub fn num_pending(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn num_passed(&self) -> usize {
        self.passed.len()
    }

    #[inline]
    pub fn total_assigned(&self) -> usize {
        self.total_assigned
    }

    // ── Aggregate metrics ─────────────────────────────────────────────────

    pub fn active_frustration(&self, clock: &SimClock) -> f64 {
        self.active.iter().map(|v| v.frustration(clock)).sum()
    }

    pub fn passed_frustration(&self, clock: &SimClock) -> f64 {
        self.passed.iter().map(|v| v.frustration(clock)).sum()
    }

    pub fn total_frustration(&self, clock: &SimClock) -> f64 {
        self.active_frustration(clock) + self.passed_frustration(clock)
    }

    /// Sum of the current waits of every queued vehicle.
    pub fn active_wait_time(&self, clock: &SimClock) -> u64 {
        self.active.iter().map(|v| v.wait(clock)).sum()
    }

    /// Vehicles (active or passed) that arrived within the last `lookback`
    /// ticks, i.e. with `now − arrival ≤ lookback`.
    pub fn arrivals_within(&self, clock: &SimClock, lookback: u64) -> usize {
        let recent = |v: &&Vehicle| clock.elapsed_since(v.arrival()) <= lookback;
        let active = self.active.iter().rev().take_while(recent).count();
        if active < self.active.len() {
            // An active vehicle is already outside the window; every passed
            // vehicle arrived even earlier.
            return active;
        }
        active + self.passed.iter().rev().take_while(recent).count()
    }

    // ── Light state ───────────────────────────────────────────────────────

    pub fn set_green(&mut self, clock: &SimClock) {
        self.is_green = true;
        self.active_since = Some(clock.now());
    }

    pub fn set_red(&mut self, clock: &SimClock) {
        self.is_green = false;
        self.last_red = Some(clock.now());
    }

    // ── Queue mutation ────────────────────────────────────────────────────

    /// Queue a pre-generated vehicle, keeping `pending` ordered by arrival.
    /// Vehicles with equal arrival ticks keep insertion order.
    pub fn add_pending(&mut self, vehicle: Vehicle) -> LaneResult<()> {
        if !matches!(self.arrivals, LaneArrivals::Prepopulated) {
            return Err(LaneError::NotPrepopulated(self.id));
        }
        let at = self.pending.partition_point(|v| v.arrival() <= vehicle.arrival());
        self.pending.insert(at, vehicle);
        self.total_assigned += 1;
        Ok(())
    }

    /// Admit every vehicle that has arrived by the current tick.
    ///
    /// Pre-populated lanes move due vehicles from `pending` to `active`;
    /// rate-driven lanes draw a Poisson count and create that many vehicles
    /// stamped with the current tick.  Returns the number admitted.
    pub fn admit(&mut self, clock: &SimClock, rng: &mut LaneRng) -> usize {
        let now = clock.now();
        match &self.arrivals {
            LaneArrivals::Prepopulated => {
                let mut admitted = 0;
                while self.pending.front().is_some_and(|v| v.arrival() <= now) {
                    if let Some(v) = self.pending.pop_front() {
                        self.active.push_back(v);
                        admitted += 1;
                    }
                }
                admitted
            }
            LaneArrivals::RateDriven(rate) => {
                let lambda = rate.per_minute(clock.hour_of_day()) * clock.step() as f64
                    / clock.ticks_per_minute();
                let count = rng.poisson(lambda) as usize;
                for _ in 0..count {
                    let id = VehicleId(self.total_assigned as u32);
                    self.active.push_back(Vehicle::new(id, now, self.frustration_fn));
                    self.total_assigned += 1;
                }
                count
            }
        }
    }

    /// Release the longest-waiting vehicle.
    ///
    /// Stamps its exit tick, moves it to `passed` and records the departure
    /// time.  Returns `Ok(None)` when nothing is queued.
    pub fn drive_one(&mut self, clock: &SimClock) -> LaneResult<Option<VehicleId>> {
        let Some(mut vehicle) = self.active.pop_front() else {
            return Ok(None);
        };
        let now = clock.now();
        if !vehicle.mark_departed(now) {
            let id = vehicle.id;
            self.active.push_front(vehicle);
            return Err(LaneError::AlreadyDeparted { lane: self.id, vehicle: id });
        }
        let id = vehicle.id;
        self.passed.push(vehicle);
        self.last_exit = Some(now);
        Ok(Some(id))
    }
}
