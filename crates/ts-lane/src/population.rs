//! Bulk pre-generation of vehicles for pre-populated runs.

use ts_core::{SimClock, SimRng, Tick, TsError, VehicleId};

use crate::{Lane, LaneResult, Vehicle};

/// Generate `num_vehicles` arrivals and spread them across `lanes`.
///
/// Inter-arrival gaps are exponential with mean
/// `ticks_per_minute / arrival_rate_per_minute`, truncated to whole ticks;
/// each vehicle goes to a uniformly random lane.  Arrival ticks are
/// cumulative from the clock's current tick, so the resulting sequence is
/// non-decreasing and every lane's `pending` stays sorted.
pub fn populate_lanes(
    lanes:                   &mut [Lane],
    num_vehicles:            usize,
    arrival_rate_per_minute: f64,
    clock:                   &SimClock,
    rng:                     &mut SimRng,
) -> LaneResult<()> {
    if lanes.is_empty() {
        return Err(TsError::Config("cannot populate zero lanes".into()).into());
    }
    if !(arrival_rate_per_minute.is_finite() && arrival_rate_per_minute > 0.0) {
        return Err(TsError::InvalidParameter {
            name:  "arrival_rate_per_minute",
            value: arrival_rate_per_minute,
        }
        .into());
    }

    let mean_gap = clock.ticks_per_minute() / arrival_rate_per_minute;
    let mut arrival = clock.now();
    for _ in 0..num_vehicles {
        arrival = arrival + rng.exponential(mean_gap) as u64;
        let lane = &mut lanes[rng.gen_range(0..lanes.len())];
        let id = VehicleId(lane.total_assigned() as u32);
        lane.add_pending(Vehicle::new(id, arrival, lane.frustration_fn()))?;
    }
    Ok(())
}

/// Arrival tick of the last pre-generated vehicle, if any lane has one.
pub fn last_arrival(lanes: &[Lane]) -> Option<Tick> {
    lanes.iter().filter_map(|l| l.last_pending().map(Vehicle::arrival)).max()
}
