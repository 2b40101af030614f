//! Per-tick time series captured when `save_history` is enabled.

use ts_core::{LaneId, Tick};
use ts_lane::Lane;

/// Column-oriented record of a run, one entry per tick per series.
///
/// Index `i` of every series refers to `ticks[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    /// The tick each row was recorded at.
    pub ticks:          Vec<Tick>,
    /// `lane_activity[lane][i]`: queue length of `lane` after tick `i`.
    pub lane_activity:  Vec<Vec<usize>>,
    /// Green lane after tick `i`.
    pub active_light:   Vec<LaneId>,
    /// `rate_estimates[lane][i]`: the lane's arrival-rate estimate
    /// (vehicles / minute), if an adaptive strategy has published one.
    pub rate_estimates: Vec<Vec<Option<f64>>>,
    /// Ticks at which the light changed.
    pub switches:       Vec<Tick>,
}

impl History {
    pub fn new(lane_count: usize) -> Self {
        Self {
            ticks:          Vec::new(),
            lane_activity:  vec![Vec::new(); lane_count],
            active_light:   Vec::new(),
            rate_estimates: vec![Vec::new(); lane_count],
            switches:       Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, tick: Tick, lanes: &[Lane], active: LaneId) {
        self.ticks.push(tick);
        self.active_light.push(active);
        for (i, lane) in lanes.iter().enumerate() {
            self.lane_activity[i].push(lane.num_active());
            self.rate_estimates[i].push(lane.rate_estimate);
        }
    }

    pub(crate) fn record_switch(&mut self, tick: Tick) {
        self.switches.push(tick);
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn lane_count(&self) -> usize {
        self.lane_activity.len()
    }

    /// Total queued vehicles across all lanes at row `i`.
    pub fn total_active(&self, i: usize) -> usize {
        self.lane_activity.iter().filter_map(|series| series.get(i)).sum()
    }

    /// Number of rows in which `lane` was green.
    pub fn green_ticks(&self, lane: LaneId) -> usize {
        self.active_light.iter().filter(|&&l| l == lane).count()
    }
}
