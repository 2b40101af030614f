//! The `SwitchStrategy` trait — the decision hook of the controller.

use ts_lane::Lane;

use crate::SwitchContext;

/// Pluggable light-switching policy.
///
/// # Thread safety
///
/// Trials may run on Rayon worker threads, and each trial owns its
/// strategy, so implementations must be `Send`.
pub trait SwitchStrategy: Send + 'static {
    /// Short label used in logs and output files.
    fn name(&self) -> &'static str;

    /// Called once by the controller builder before the first tick.
    ///
    /// Default: nothing to prepare.
    fn init(&mut self, _lanes: &mut [Lane]) {}

    /// Called once per tick.  Return `true` to rotate the green light to the
    /// next lane.
    fn should_switch(&mut self, ctx: &mut SwitchContext<'_>) -> bool;
}
