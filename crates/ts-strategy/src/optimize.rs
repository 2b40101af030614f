//! Green-share allocation over the probability simplex.
//!
//! # Problem
//!
//! Given per-lane arrival-rate estimates `r` (vehicles/minute) and the
//! service capacity of one full cycle `c = exit_rate · loop_duration`, find
//! shares `t` with `Σ tᵢ = 1`, `0 ≤ tᵢ ≤ 1` minimising
//!
//! ```text
//! f(t) = Σ max(0, rᵢ − c·tᵢ)²
//! ```
//!
//! `f` is zero wherever allocated capacity covers demand and grows
//! quadratically with any shortfall.
//!
//! # Method
//!
//! Projected gradient descent from the equal split.  The gradient
//! `∂f/∂tᵢ = −2c · max(0, rᵢ − c·tᵢ)` is Lipschitz with constant `2c²`, so a
//! fixed step of `1 / 2c²` always decreases `f`.  After each step the iterate
//! is projected back onto the simplex (sort-based Euclidean projection),
//! which enforces both the equality and the box constraints.  Iteration stops
//! when no share moves by more than `tolerance`.

use crate::OptimizeError;

/// Solver knobs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OptimizeOptions {
    /// Largest per-share change that still counts as "converged".
    pub tolerance:      f64,
    pub max_iterations: u32,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            tolerance:      1e-9,
            max_iterations: 10_000,
        }
    }
}

/// A solved allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    pub shares:     Vec<f64>,
    /// Objective value at `shares`.
    pub penalty:    f64,
    pub iterations: u32,
}

/// `tᵢ = 1/N` for every lane.
pub fn equal_split(n: usize) -> Vec<f64> {
    vec![1.0 / n.max(1) as f64; n]
}

/// The objective `Σ max(0, rᵢ − c·tᵢ)²`.
pub fn queue_penalty(rates: &[f64], shares: &[f64], capacity: f64) -> f64 {
    rates
        .iter()
        .zip(shares)
        .map(|(&r, &t)| (r - capacity * t).max(0.0).powi(2))
        .sum()
}

/// Euclidean projection of `v` onto `{ t : Σ tᵢ = 1, tᵢ ≥ 0 }`, in place.
pub fn project_onto_simplex(v: &mut [f64]) {
    if v.is_empty() {
        return;
    }
    let mut sorted = v.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut cumsum = 0.0;
    let mut theta = 0.0;
    for (j, &u) in sorted.iter().enumerate() {
        cumsum += u;
        let candidate = (cumsum - 1.0) / (j + 1) as f64;
        if u - candidate > 0.0 {
            theta = candidate;
        }
    }
    for x in v.iter_mut() {
        *x = (*x - theta).max(0.0);
    }
}

/// Minimise the queue penalty for `rates` at cycle capacity `capacity`.
pub fn solve_allocation(
    rates:    &[f64],
    capacity: f64,
    options:  &OptimizeOptions,
) -> Result<Allocation, OptimizeError> {
    if rates.is_empty() {
        return Err(OptimizeError::Empty);
    }
    if let Some((lane, &value)) = rates.iter().enumerate().find(|(_, r)| !r.is_finite()) {
        return Err(OptimizeError::NonFiniteRate { lane, value });
    }
    if !(capacity.is_finite() && capacity > 0.0) {
        return Err(OptimizeError::NonPositiveCapacity(capacity));
    }

    let step = 1.0 / (2.0 * capacity * capacity);
    let mut shares = equal_split(rates.len());
    let mut next = vec![0.0; rates.len()];

    for iteration in 1..=options.max_iterations {
        for ((n, &t), &r) in next.iter_mut().zip(&shares).zip(rates) {
            let shortfall = (r - capacity * t).max(0.0);
            *n = t + step * 2.0 * capacity * shortfall;
        }
        project_onto_simplex(&mut next);

        let delta = next
            .iter()
            .zip(&shares)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        std::mem::swap(&mut shares, &mut next);

        if delta <= options.tolerance {
            return Ok(Allocation {
                penalty: queue_penalty(rates, &shares, capacity),
                shares,
                iterations: iteration,
            });
        }
    }
    Err(OptimizeError::NotConverged(options.max_iterations))
}
