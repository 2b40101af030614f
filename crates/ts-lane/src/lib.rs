//! `ts-lane` — vehicles and the per-lane queues they wait in.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`vehicle`]    | `Vehicle` — arrival tick, optional exit tick, cost curve  |
//! | [`lane`]       | `Lane`, `LaneArrivals` — pending/active/passed queues     |
//! | [`population`] | Bulk pre-generation of arrivals across lanes              |
//! | [`error`]      | `LaneError`, `LaneResult<T>`                              |
//!
//! # Vehicle lifecycle
//!
//! ```text
//! pending ──(arrival_time ≤ now)──▶ active ──(drive_one)──▶ passed
//! ```
//!
//! Rate-driven lanes skip `pending`: vehicles are created directly in
//! `active` at the tick they arrive.  A vehicle is never dropped, so final
//! statistics can be computed over every vehicle a lane ever received.

pub mod error;
pub mod lane;
pub mod population;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{LaneError, LaneResult};
pub use lane::{Lane, LaneArrivals};
pub use population::{last_arrival, populate_lanes};
pub use vehicle::Vehicle;
