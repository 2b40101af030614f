//! `ts-core` — foundational types for the traffic-signal simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It intentionally
//! has no `ts-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LaneId`, `VehicleId`, `TrialId`                      |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `LaneRng` (per-lane), `SimRng` (per-trial)            |
//! | [`frustration`] | `FrustrationFn` — wait-time cost curves               |
//! | [`rate`]        | `RateFn` — time-of-day arrival rates                  |
//! | [`error`]       | `TsError`, `TsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod frustration;
pub mod ids;
pub mod rate;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TsError, TsResult};
pub use frustration::FrustrationFn;
pub use ids::{LaneId, TrialId, VehicleId};
pub use rate::{RateFn, RushPeak};
pub use rng::{LaneRng, SimRng, trial_seed};
pub use time::{SimClock, Tick};
