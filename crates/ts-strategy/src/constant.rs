//! Fixed-duration baseline.

use crate::{SwitchContext, SwitchStrategy};

/// Switch once the green phase has lasted longer than `wait_time` ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantStrategy {
    pub wait_time: u64,
}

impl ConstantStrategy {
    pub fn new(wait_time: u64) -> Self {
        Self { wait_time }
    }
}

impl SwitchStrategy for ConstantStrategy {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn should_switch(&mut self, ctx: &mut SwitchContext<'_>) -> bool {
        ctx.green_elapsed() > self.wait_time
    }
}
