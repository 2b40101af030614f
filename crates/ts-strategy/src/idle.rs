//! Idle-aware strategy: don't hold green for an empty lane.

use crate::{SwitchContext, SwitchStrategy};

/// Switch when the active lane has been empty for more than `idle_time`
/// ticks, or unconditionally once green has lasted more than `wait_time`.
///
/// "Empty for" is measured from the later of the green-on tick and the last
/// departure, so a lane that turns green with nobody waiting switches at
/// `active_since + idle_time + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct IdleStrategy {
    pub wait_time: u64,
    pub idle_time: u64,
}

impl IdleStrategy {
    pub fn new(wait_time: u64, idle_time: u64) -> Self {
        Self { wait_time, idle_time }
    }
}

impl SwitchStrategy for IdleStrategy {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn should_switch(&mut self, ctx: &mut SwitchContext<'_>) -> bool {
        let lane = ctx.active_lane();
        let is_idle = lane.num_active() == 0
            && ctx.clock.elapsed_since_mark(lane.idle_since()) > self.idle_time;
        is_idle || ctx.green_elapsed() > self.wait_time
    }
}
