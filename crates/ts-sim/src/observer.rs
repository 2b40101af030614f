//! Controller observer trait for progress reporting and data collection.

use ts_core::{LaneId, SimClock, Tick};
use ts_lane::Lane;

/// Callbacks invoked by [`Controller::step`][crate::Controller::step] and
/// [`Controller::run`][crate::Controller::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — switch counter
///
/// ```rust,ignore
/// struct SwitchCounter(usize);
///
/// impl SimObserver for SwitchCounter {
///     fn on_switch(&mut self, _tick: Tick, _from: LaneId, _to: LaneId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called right after the clock advances, before any lane is touched.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when the light moves from `from` to `to`.
    fn on_switch(&mut self, _tick: Tick, _from: LaneId, _to: LaneId) {}

    /// Called at the end of each tick with read-only access to every lane,
    /// so output writers can record state without the controller knowing
    /// about any specific format.
    fn on_tick_end(&mut self, _clock: &SimClock, _lanes: &[Lane], _active: LaneId) {}

    /// Called once when [`Controller::run`][crate::Controller::run] returns
    /// successfully.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
