//! Unit tests for ts-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LaneId, TrialId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = LaneId(2);
        assert_eq!(id.index(), 2);
        assert_eq!(LaneId::try_from(2usize).unwrap(), id);
    }

    #[test]
    fn lane_id_overflow_rejected() {
        assert!(LaneId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
        assert_eq!(TrialId(0).to_string(), "TrialId(0)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(5)), 0);
    }

    #[test]
    fn zero_step_rejected() {
        assert!(SimClock::new(0, 1).is_err());
        assert!(SimClock::new(1, 0).is_err());
    }

    #[test]
    fn advance_uses_step() {
        let mut clock = SimClock::new(3, 1).unwrap();
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), Tick(6));
        assert_eq!(clock.elapsed_since(Tick(2)), 4);
    }

    #[test]
    fn absent_mark_is_infinitely_old() {
        let clock = SimClock::default();
        assert_eq!(clock.elapsed_since_mark(None), u64::MAX);
        assert_eq!(clock.elapsed_since_mark(Some(Tick(0))), 0);
    }

    #[test]
    fn hour_of_day_wraps() {
        let mut clock = SimClock::new(1, 3_600).unwrap();
        for _ in 0..25 {
            clock.advance();
        }
        assert!((clock.hour_of_day() - 1.0).abs() < 1e-12);
        assert!((clock.elapsed_hours() - 25.0).abs() < 1e-12);
        assert_eq!(clock.elapsed_dhm(), (1, 1, 0));
    }

    #[test]
    fn ticks_for_hours_rounds_up() {
        let clock = SimClock::default();
        assert_eq!(clock.ticks_for_hours(1.0), 3_600);
        let coarse = SimClock::new(1, 7).unwrap();
        assert_eq!(coarse.ticks_for_secs(15), 3);
    }

    #[test]
    fn display() {
        let mut clock = SimClock::new(1, 60).unwrap();
        for _ in 0..61 {
            clock.advance();
        }
        assert_eq!(clock.to_string(), "T61 (day 0 01:01)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{LaneId, LaneRng, SimRng, TrialId, trial_seed};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.exponential(2.0), r2.exponential(2.0));
        }
    }

    #[test]
    fn different_lanes_differ() {
        let mut r0 = LaneRng::new(1, LaneId(0));
        let mut r1 = LaneRng::new(1, LaneId(1));
        let a: Vec<u64> = (0..32).map(|_| r0.poisson(5.0)).collect();
        let b: Vec<u64> = (0..32).map(|_| r1.poisson(5.0)).collect();
        assert_ne!(a, b, "seeds for adjacent lanes should diverge");
    }

    #[test]
    fn trial_seeds_differ() {
        assert_ne!(trial_seed(7, TrialId(0)), trial_seed(7, TrialId(1)));
        assert_eq!(trial_seed(7, TrialId(3)), trial_seed(7, TrialId(3)));
    }

    #[test]
    fn degenerate_rates_sample_zero() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.poisson(0.0), 0);
        assert_eq!(rng.poisson(f64::NAN), 0);
        assert_eq!(rng.exponential(-1.0), 0.0);
    }

    #[test]
    fn exponential_mean_is_close() {
        let mut rng = SimRng::new(99);
        let n = 20_000;
        let mean = (0..n).map(|_| rng.exponential(2.0)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "sample mean {mean}");
    }

    #[test]
    fn poisson_mean_is_close() {
        let mut rng = LaneRng::new(5, LaneId(0));
        let n = 20_000;
        let mean = (0..n).map(|_| rng.poisson(0.5)).sum::<u64>() as f64 / n as f64;
        assert!((mean - 0.5).abs() < 0.05, "sample mean {mean}");
    }
}

#[cfg(test)]
mod frustration {
    use crate::FrustrationFn;

    fn assert_monotone(f: FrustrationFn) {
        let mut prev = f.eval(0);
        assert!(prev >= 0.0);
        for w in 1..2_000 {
            let cur = f.eval(w);
            assert!(cur >= prev, "{f:?} decreased at wait {w}");
            prev = cur;
        }
    }

    #[test]
    fn quadratic_values() {
        let f = FrustrationFn::Quadratic;
        assert_eq!(f.eval(0), 0.0);
        assert_eq!(f.eval(60), 1.0);
        assert_eq!(f.eval(120), 4.0);
    }

    #[test]
    fn exponential_values() {
        let f = FrustrationFn::Exponential { k: 1.0 };
        assert_eq!(f.eval(0), 0.0);
        assert!((f.eval(60) - (std::f64::consts::E - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn supplied_functions_are_monotone() {
        assert_monotone(FrustrationFn::Quadratic);
        assert_monotone(FrustrationFn::Exponential { k: 0.5 });
        assert_monotone(FrustrationFn::Polynomial { power: 1.5 });
    }

    #[test]
    fn validation() {
        assert!(FrustrationFn::Quadratic.validate().is_ok());
        assert!(FrustrationFn::Exponential { k: 0.0 }.validate().is_err());
        assert!(FrustrationFn::Polynomial { power: 0.5 }.validate().is_err());
    }
}

#[cfg(test)]
mod rate {
    use crate::{RateFn, RushPeak};

    #[test]
    fn constant_ignores_hour() {
        let r = RateFn::Constant { per_minute: 12.0 };
        assert_eq!(r.per_minute(3.0), 12.0);
        assert_eq!(r.per_minute(27.0), 12.0);
    }

    #[test]
    fn rush_hour_peaks_at_center() {
        let r = RateFn::RushHour {
            base: 2.0,
            peaks: vec![RushPeak { hour: 8.0, height: 10.0, width: 1.0 }],
        };
        assert!((r.per_minute(8.0) - 12.0).abs() < 1e-12);
        assert!(r.per_minute(7.0) < r.per_minute(8.0));
        assert!((r.per_minute(7.0) - r.per_minute(9.0)).abs() < 1e-12);
    }

    #[test]
    fn rush_hour_wraps_midnight() {
        let r = RateFn::RushHour {
            base: 0.0,
            peaks: vec![RushPeak { hour: 23.5, height: 4.0, width: 1.0 }],
        };
        assert!((r.per_minute(0.5) - r.per_minute(22.5)).abs() < 1e-12);
    }

    #[test]
    fn schedule_steps_and_wraps() {
        let r = RateFn::Schedule { points: vec![(6.0, 10.0), (20.0, 2.0)] };
        assert_eq!(r.per_minute(7.0), 10.0);
        assert_eq!(r.per_minute(21.0), 2.0);
        assert_eq!(r.per_minute(3.0), 2.0);
    }

    #[test]
    fn validation() {
        assert!(RateFn::Constant { per_minute: -1.0 }.validate().is_err());
        assert!(RateFn::Schedule { points: vec![] }.validate().is_err());
        assert!(RateFn::Schedule { points: vec![(5.0, 1.0), (2.0, 1.0)] }.validate().is_err());
        assert!(
            RateFn::RushHour {
                base: 1.0,
                peaks: vec![RushPeak { hour: 8.0, height: 1.0, width: 0.0 }],
            }
            .validate()
            .is_err()
        );
    }
}
