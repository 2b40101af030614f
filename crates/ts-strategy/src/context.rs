//! Per-tick view handed to a [`SwitchStrategy`][crate::SwitchStrategy].

use ts_core::{LaneId, SimClock};
use ts_lane::Lane;

/// Everything a strategy may inspect when deciding whether to switch.
///
/// Lanes are borrowed mutably so adaptive strategies can write
/// `wait_time` / `rate_estimate`; the clock is read-only.
pub struct SwitchContext<'a> {
    pub clock:     &'a SimClock,
    pub lanes:     &'a mut [Lane],
    /// The lane that is currently green.
    pub active:    LaneId,
    /// Vehicles released per tick while green.
    pub exit_rate: f64,
}

impl<'a> SwitchContext<'a> {
    pub fn new(clock: &'a SimClock, lanes: &'a mut [Lane], active: LaneId, exit_rate: f64) -> Self {
        Self { clock, lanes, active, exit_rate }
    }

    #[inline]
    pub fn active_lane(&self) -> &Lane {
        &self.lanes[self.active.index()]
    }

    /// Ticks since the active lane turned green.
    #[inline]
    pub fn green_elapsed(&self) -> u64 {
        self.clock.elapsed_since_mark(self.active_lane().active_since())
    }
}
