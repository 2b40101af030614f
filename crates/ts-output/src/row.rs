//! Plain data row types written by output backends.

use ts_core::{LaneId, SimClock};
use ts_lane::Lane;
use ts_sim::TrialSummary;

/// State of one lane at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneTickRow {
    pub tick:          u64,
    pub lane:          u16,
    /// Vehicles queued at the light.
    pub active:        u64,
    /// Vehicles that have departed so far.
    pub passed:        u64,
    pub is_green:      bool,
    /// Green duration currently assigned to the lane.
    pub wait_time:     u64,
    /// Arrival-rate estimate (vehicles / minute), if one was published.
    pub rate_estimate: Option<f64>,
}

impl LaneTickRow {
    pub fn from_lane(clock: &SimClock, lane: &Lane) -> Self {
        Self {
            tick:          clock.now().0,
            lane:          lane.id.0,
            active:        lane.num_active() as u64,
            passed:        lane.num_passed() as u64,
            is_green:      lane.is_green(),
            wait_time:     lane.wait_time,
            rate_estimate: lane.rate_estimate,
        }
    }

    pub fn lane_id(&self) -> LaneId {
        LaneId(self.lane)
    }
}

/// End-of-run metrics for one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummaryRow {
    pub trial:               u32,
    pub strategy:            String,
    pub seed:                u64,
    pub final_tick:          u64,
    pub num_vehicles:        u64,
    pub num_passed:          u64,
    pub num_active:          u64,
    pub switches:            u64,
    pub total_frustration:   f64,
    /// Empty when no vehicle departed.
    pub average_frustration: Option<f64>,
}

impl From<&TrialSummary> for TrialSummaryRow {
    fn from(s: &TrialSummary) -> Self {
        Self {
            trial:               s.trial.0,
            strategy:            s.strategy.to_string(),
            seed:                s.seed,
            final_tick:          s.final_tick.0,
            num_vehicles:        s.num_vehicles as u64,
            num_passed:          s.num_passed as u64,
            num_active:          s.num_active as u64,
            switches:            s.switches as u64,
            total_frustration:   s.total_frustration,
            average_frustration: s.average_frustration,
        }
    }
}
