//! A single car waiting at (or having passed) the intersection.

use ts_core::{FrustrationFn, SimClock, Tick, VehicleId};

/// One vehicle.  Mutated exactly once, when it departs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// Creation-order index within the owning lane.
    pub id: VehicleId,
    arrival: Tick,
    exit: Option<Tick>,
    frustration_fn: FrustrationFn,
}

impl Vehicle {
    pub fn new(id: VehicleId, arrival: Tick, frustration_fn: FrustrationFn) -> Self {
        Self {
            id,
            arrival,
            exit: None,
            frustration_fn,
        }
    }

    #[inline]
    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    #[inline]
    pub fn exit(&self) -> Option<Tick> {
        self.exit
    }

    #[inline]
    pub fn frustration_fn(&self) -> FrustrationFn {
        self.frustration_fn
    }

    #[inline]
    pub fn is_departed(&self) -> bool {
        self.exit.is_some()
    }

    /// Stamp the departure tick.  Returns `false` (and leaves the vehicle
    /// untouched) if it had already departed.
    #[must_use]
    pub fn mark_departed(&mut self, tick: Tick) -> bool {
        if self.exit.is_some() {
            return false;
        }
        self.exit = Some(tick);
        true
    }

    /// Ticks waited: up to departure if departed, otherwise up to now.
    #[inline]
    pub fn wait(&self, clock: &SimClock) -> u64 {
        self.exit.unwrap_or(clock.now()).since(self.arrival)
    }

    /// Cost of the wait so far, with ticks converted to seconds.
    #[inline]
    pub fn frustration(&self, clock: &SimClock) -> f64 {
        let wait_secs = self.wait(clock).saturating_mul(clock.tick_duration_secs() as u64);
        self.frustration_fn.eval(wait_secs)
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exit {
            Some(exit) => write!(f, "{} arrived {} exited {}", self.id, self.arrival, exit),
            None => write!(f, "{} arrived {}", self.id, self.arrival),
        }
    }
}
