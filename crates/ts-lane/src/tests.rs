//! Unit tests for ts-lane.

use ts_core::{FrustrationFn, LaneId, LaneRng, RateFn, SimClock, SimRng, Tick, VehicleId};

use crate::{Lane, LaneError, Vehicle, populate_lanes};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn clock_at(t: u64) -> SimClock {
    let mut clock = SimClock::default();
    clock.current_tick = Tick(t);
    clock
}

fn vehicle(id: u32, arrival: u64) -> Vehicle {
    Vehicle::new(VehicleId(id), Tick(arrival), FrustrationFn::Quadratic)
}

fn lane_with_arrivals(arrivals: &[u64]) -> Lane {
    let mut lane = Lane::prepopulated(LaneId(0), FrustrationFn::Quadratic);
    for (i, &a) in arrivals.iter().enumerate() {
        lane.add_pending(vehicle(i as u32, a)).unwrap();
    }
    lane
}

fn rng() -> LaneRng {
    LaneRng::new(42, LaneId(0))
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicle_tests {
    use super::*;

    #[test]
    fn wait_tracks_clock_until_departure() {
        let mut v = vehicle(0, 10);
        assert_eq!(v.wait(&clock_at(70)), 60);
        assert_eq!(v.frustration(&clock_at(70)), 1.0);

        assert!(v.mark_departed(Tick(130)));
        assert_eq!(v.wait(&clock_at(500)), 120);
        assert_eq!(v.frustration(&clock_at(500)), 4.0);
    }

    #[test]
    fn frustration_counts_simulated_seconds() {
        let mut clock = SimClock::new(1, 60).unwrap();
        let v = vehicle(0, 0);
        clock.current_tick = Tick(1);
        assert_eq!(v.wait(&clock), 1);
        assert_eq!(v.frustration(&clock), 1.0);
        clock.current_tick = Tick(2);
        assert_eq!(v.frustration(&clock), 4.0);
    }

    #[test]
    fn departing_twice_is_rejected() {
        let mut v = vehicle(0, 0);
        assert!(v.mark_departed(Tick(5)));
        assert!(!v.mark_departed(Tick(9)));
        assert_eq!(v.exit(), Some(Tick(5)));
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lane_tests {
    use super::*;

    #[test]
    fn pending_kept_in_arrival_order() {
        let lane = lane_with_arrivals(&[9, 3, 5, 3]);
        let order: Vec<u64> = lane.pending().map(|v| v.arrival().0).collect();
        assert_eq!(order, vec![3, 3, 5, 9]);
        // Ties keep insertion order.
        let ids: Vec<u32> = lane.pending().map(|v| v.id.0).collect();
        assert_eq!(&ids[..2], &[1, 3]);
    }

    #[test]
    fn admit_moves_only_arrived_vehicles() {
        let mut lane = lane_with_arrivals(&[1, 2, 5]);
        assert_eq!(lane.admit(&clock_at(2), &mut rng()), 2);
        assert_eq!(lane.num_active(), 2);
        assert_eq!(lane.num_pending(), 1);
        assert_eq!(lane.admit(&clock_at(4), &mut rng()), 0);
        assert_eq!(lane.admit(&clock_at(5), &mut rng()), 1);
        assert_eq!(lane.num_pending(), 0);
    }

    #[test]
    fn drive_one_is_fifo() {
        let mut lane = lane_with_arrivals(&[4, 1, 2]);
        lane.admit(&clock_at(10), &mut rng());
        let mut departed = vec![];
        for t in 11..14 {
            departed.push(lane.drive_one(&clock_at(t)).unwrap().unwrap());
        }
        assert_eq!(departed, vec![VehicleId(1), VehicleId(2), VehicleId(0)]);
        let exits: Vec<Tick> = lane.passed().iter().filter_map(Vehicle::exit).collect();
        assert_eq!(exits, vec![Tick(11), Tick(12), Tick(13)]);
        assert_eq!(lane.last_exit(), Some(Tick(13)));
    }

    #[test]
    fn drive_on_empty_lane_is_noop() {
        let mut lane = lane_with_arrivals(&[]);
        assert!(lane.drive_one(&clock_at(3)).unwrap().is_none());
        assert_eq!(lane.last_exit(), None);
    }

    #[test]
    fn double_departure_is_an_error() {
        let mut lane = lane_with_arrivals(&[]);
        let mut v = vehicle(0, 0);
        assert!(v.mark_departed(Tick(0)));
        lane.add_pending(v).unwrap();
        lane.admit(&clock_at(1), &mut rng());
        let err = lane.drive_one(&clock_at(2)).unwrap_err();
        assert!(matches!(err, LaneError::AlreadyDeparted { vehicle: VehicleId(0), .. }));
        // Queue state is left intact.
        assert_eq!(lane.num_active(), 1);
        assert_eq!(lane.num_passed(), 0);
    }

    #[test]
    fn conservation_across_moves() {
        let mut lane = lane_with_arrivals(&[0, 1, 2, 3, 4, 5]);
        for t in 0..12 {
            let clock = clock_at(t);
            lane.admit(&clock, &mut rng());
            if t % 2 == 0 {
                lane.drive_one(&clock).unwrap();
            }
            assert_eq!(
                lane.num_pending() + lane.num_active() + lane.num_passed(),
                lane.total_assigned(),
            );
        }
        assert_eq!(lane.num_passed(), 6);
    }

    #[test]
    fn green_red_bookkeeping() {
        let mut lane = lane_with_arrivals(&[]);
        assert!(!lane.is_green());
        assert_eq!(lane.active_since(), None);
        lane.set_green(&clock_at(7));
        assert!(lane.is_green());
        assert_eq!(lane.active_since(), Some(Tick(7)));
        lane.set_red(&clock_at(12));
        assert!(!lane.is_green());
        assert_eq!(lane.last_red(), Some(Tick(12)));
        assert_eq!(lane.active_since(), Some(Tick(7)));
    }

    #[test]
    fn idle_since_is_latest_of_green_and_exit() {
        let mut lane = lane_with_arrivals(&[0]);
        assert_eq!(lane.idle_since(), None);
        lane.admit(&clock_at(1), &mut rng());
        lane.drive_one(&clock_at(4)).unwrap();
        assert_eq!(lane.idle_since(), Some(Tick(4)));
        lane.set_green(&clock_at(9));
        assert_eq!(lane.idle_since(), Some(Tick(9)));
    }

    #[test]
    fn frustration_totals() {
        let mut lane = lane_with_arrivals(&[0, 0]);
        let clock = clock_at(60);
        lane.admit(&clock, &mut rng());
        lane.drive_one(&clock).unwrap();
        let later = clock_at(120);
        assert_eq!(lane.passed_frustration(&later), 1.0);
        assert_eq!(lane.active_frustration(&later), 4.0);
        assert_eq!(lane.total_frustration(&later), 5.0);
        assert_eq!(lane.active_wait_time(&later), 120);
    }

    #[test]
    fn arrivals_within_lookback() {
        let mut lane = lane_with_arrivals(&[0, 10, 20, 30, 40]);
        lane.admit(&clock_at(40), &mut rng());
        lane.drive_one(&clock_at(40)).unwrap();
        lane.drive_one(&clock_at(40)).unwrap();
        let clock = clock_at(50);
        assert_eq!(lane.arrivals_within(&clock, 10), 1);
        assert_eq!(lane.arrivals_within(&clock, 30), 3);
        assert_eq!(lane.arrivals_within(&clock, 40), 4);
        assert_eq!(lane.arrivals_within(&clock, 1_000), 5);
    }

    #[test]
    fn rate_driven_lane_rejects_pending() {
        let mut lane = Lane::rate_driven(
            LaneId(1),
            RateFn::Constant { per_minute: 6.0 },
            FrustrationFn::Quadratic,
        );
        let err = lane.add_pending(vehicle(0, 0)).unwrap_err();
        assert!(matches!(err, LaneError::NotPrepopulated(LaneId(1))));
    }

    #[test]
    fn rate_driven_admission_stamps_now() {
        let mut lane = Lane::rate_driven(
            LaneId(0),
            RateFn::Constant { per_minute: 6_000.0 }, // λ = 100 per tick
            FrustrationFn::Quadratic,
        );
        let mut rng = rng();
        let clock = clock_at(3);
        let n = lane.admit(&clock, &mut rng);
        assert!(n > 0);
        assert_eq!(lane.num_active(), n);
        assert_eq!(lane.total_assigned(), n);
        assert!(lane.active().all(|v| v.arrival() == Tick(3)));
    }

    #[test]
    fn rate_driven_zero_rate_admits_nothing() {
        let mut lane = Lane::rate_driven(
            LaneId(0),
            RateFn::Constant { per_minute: 0.0 },
            FrustrationFn::Quadratic,
        );
        let mut rng = rng();
        for t in 0..100 {
            assert_eq!(lane.admit(&clock_at(t), &mut rng), 0);
        }
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population_tests {
    use super::*;
    use crate::last_arrival;

    fn lanes(n: u16) -> Vec<Lane> {
        (0..n).map(|i| Lane::prepopulated(LaneId(i), FrustrationFn::Quadratic)).collect()
    }

    fn arrivals(lanes: &[Lane]) -> Vec<Vec<u64>> {
        lanes.iter().map(|l| l.pending().map(|v| v.arrival().0).collect()).collect()
    }

    #[test]
    fn all_vehicles_assigned() {
        let mut ls = lanes(3);
        populate_lanes(&mut ls, 100, 30.0, &SimClock::default(), &mut SimRng::new(1)).unwrap();
        let total: usize = ls.iter().map(Lane::total_assigned).sum();
        assert_eq!(total, 100);
        for lane in &ls {
            let a: Vec<u64> = lane.pending().map(|v| v.arrival().0).collect();
            assert!(a.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn same_seed_same_arrivals() {
        let mut a = lanes(3);
        let mut b = lanes(3);
        populate_lanes(&mut a, 50, 30.0, &SimClock::default(), &mut SimRng::new(9)).unwrap();
        populate_lanes(&mut b, 50, 30.0, &SimClock::default(), &mut SimRng::new(9)).unwrap();
        assert_eq!(arrivals(&a), arrivals(&b));
    }

    #[test]
    fn mean_gap_matches_rate() {
        let mut ls = lanes(1);
        populate_lanes(&mut ls, 5_000, 30.0, &SimClock::default(), &mut SimRng::new(3)).unwrap();
        // Truncated exponential with mean 2 → mean gap ≈ 2 − ~0.5.
        let last = last_arrival(&ls).unwrap().0 as f64;
        let mean_gap = last / 5_000.0;
        assert!(mean_gap > 1.2 && mean_gap < 1.9, "mean gap {mean_gap}");
    }

    #[test]
    fn invalid_inputs_rejected() {
        let mut none: Vec<Lane> = vec![];
        assert!(populate_lanes(&mut none, 1, 30.0, &SimClock::default(), &mut SimRng::new(0)).is_err());
        let mut ls = lanes(2);
        assert!(populate_lanes(&mut ls, 1, 0.0, &SimClock::default(), &mut SimRng::new(0)).is_err());
    }
}
