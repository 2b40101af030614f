//! Deterministic per-lane and trial-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every trial owns its own generators; nothing is global.  A trial's root
//! seed is derived from the run seed with [`trial_seed`], and each lane gets
//! an independent `SmallRng` seeded by:
//!
//!   seed = finalize(rotl(trial_seed, 32) XOR ((lane_id + 1) * MIXING_CONSTANT))
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive IDs uniformly across the seed space; the
//! SplitMix64 finalizer decorrelates the trial and lane streams.  This means:
//!
//! - Lanes never share RNG state, so the order in which lanes are admitted
//!   within a tick cannot change any lane's arrival sequence.
//! - Parallel trials never share generator state and need no locking.
//! - The same run seed always reproduces the same trial outputs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Poisson};

use crate::{LaneId, TrialId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 output function.
#[inline]
fn finalize(mut z: u64) -> u64 {
    z = z.wrapping_add(MIXING_CONSTANT);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Derive the root seed of trial `trial` from the run-wide seed.
#[inline]
pub fn trial_seed(run_seed: u64, trial: TrialId) -> u64 {
    finalize(run_seed ^ (trial.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT))
}

// ── Shared sampling helpers ───────────────────────────────────────────────────

/// Exponential sample with the given mean.  Non-positive or non-finite means
/// yield 0.
fn sample_exponential(rng: &mut SmallRng, mean: f64) -> f64 {
    if !(mean.is_finite() && mean > 0.0) {
        return 0.0;
    }
    Exp::new(1.0 / mean).map_or(0.0, |d| d.sample(rng))
}

/// Poisson count with rate `lambda`.  Non-positive or non-finite rates yield 0.
fn sample_poisson(rng: &mut SmallRng, lambda: f64) -> u64 {
    if !(lambda.is_finite() && lambda > 0.0) {
        return 0;
    }
    Poisson::new(lambda).map_or(0, |d| {
        let k: f64 = d.sample(rng);
        k as u64
    })
}

// ── LaneRng ───────────────────────────────────────────────────────────────────

/// Per-lane deterministic RNG, used for rate-driven arrivals.
///
/// Create one per lane at controller build time and keep it in a `Vec`
/// parallel to the lanes.
pub struct LaneRng(SmallRng);

impl LaneRng {
    /// Seed deterministically from the trial seed and a lane ID.
    pub fn new(trial_seed: u64, lane: LaneId) -> Self {
        let seed = finalize(
            trial_seed.rotate_left(32) ^ (lane.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT),
        );
        LaneRng(SmallRng::seed_from_u64(seed))
    }

    /// Number of arrivals in one tick for an expected count `lambda`.
    #[inline]
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        sample_poisson(&mut self.0, lambda)
    }

    #[inline]
    pub fn exponential(&mut self, mean: f64) -> f64 {
        sample_exponential(&mut self.0, mean)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Trial-level RNG for global operations (bulk vehicle generation, lane
/// assignment).
///
/// Used only on the thread that owns the trial.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Exponential sample with the given mean (e.g. an inter-arrival gap).
    #[inline]
    pub fn exponential(&mut self, mean: f64) -> f64 {
        sample_exponential(&mut self.0, mean)
    }

    #[inline]
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        sample_poisson(&mut self.0, lambda)
    }
}
