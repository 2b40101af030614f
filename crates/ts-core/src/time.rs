//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter held by a single
//! `SimClock` per trial.  The controller owns the clock and is the only
//! caller of [`SimClock::advance`]; lanes and vehicles receive `&SimClock`
//! for queries.
//!
//! The mapping to simulated seconds is
//!
//!   elapsed_secs = current_tick * tick_duration_secs
//!
//! The default tick duration is 1 s, so a 24 h trial is 86,400 ticks.
//! Rate functions are evaluated against [`SimClock::hour_of_day`], which
//! wraps every 24 simulated hours.

use std::fmt;

use crate::{TsError, TsResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The logical clock shared (by reference) by every entity in one trial.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Ticks added per `advance()`.  Always > 0.
    step: u64,
    /// How many simulated seconds one tick represents.  Default: 1.
    tick_duration_secs: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            current_tick: Tick::ZERO,
            step: 1,
            tick_duration_secs: 1,
        }
    }
}

impl SimClock {
    /// Create a clock at tick 0.  Rejects a zero `step` or tick duration.
    pub fn new(step: u64, tick_duration_secs: u32) -> TsResult<Self> {
        if step == 0 {
            return Err(TsError::Config("clock step must be > 0".into()));
        }
        if tick_duration_secs == 0 {
            return Err(TsError::Config("tick duration must be > 0 s".into()));
        }
        Ok(Self {
            current_tick: Tick::ZERO,
            step,
            tick_duration_secs,
        })
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.current_tick
    }

    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[inline]
    pub fn tick_duration_secs(&self) -> u32 {
        self.tick_duration_secs
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + self.step;
    }

    /// Ticks elapsed since `mark`.
    #[inline]
    pub fn elapsed_since(&self, mark: Tick) -> u64 {
        self.current_tick.since(mark)
    }

    /// Ticks elapsed since an optional mark.  An absent mark means "never",
    /// which is infinitely long ago and reported as `u64::MAX`.
    #[inline]
    pub fn elapsed_since_mark(&self, mark: Option<Tick>) -> u64 {
        mark.map_or(u64::MAX, |m| self.elapsed_since(m))
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_secs as u64
    }

    /// Elapsed simulated hours since tick 0 (not wrapped).
    #[inline]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_secs() as f64 / 3_600.0
    }

    /// Hour of the simulated day in `[0, 24)`.
    #[inline]
    pub fn hour_of_day(&self) -> f64 {
        (self.elapsed_secs() % 86_400) as f64 / 3_600.0
    }

    /// How many ticks make up one simulated minute (may be fractional).
    #[inline]
    pub fn ticks_per_minute(&self) -> f64 {
        60.0 / self.tick_duration_secs as f64
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs();
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(self.tick_duration_secs as u64)
    }

    /// Ticks spanning a (possibly fractional) number of hours, rounded up.
    #[inline]
    pub fn ticks_for_hours(&self, hours: f64) -> u64 {
        let secs = (hours.max(0.0) * 3_600.0).ceil() as u64;
        self.ticks_for_secs(secs)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}
