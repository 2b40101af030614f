//! `ts-sim` — the intersection controller and its tick loop.
//!
//! # Tick loop
//!
//! ```text
//! each tick:
//!   ① Clock     — advance by one step.
//!   ② Admit     — every lane admits newly arrived vehicles
//!                 (pending → active, or Poisson injection).
//!   ③ Release   — if the green lane has traffic and at least 1/exit_rate
//!                 ticks have passed since its last departure, release
//!                 `departures_per_release` vehicles (FIFO).
//!   ④ Switch    — ask the strategy; on `true`, the green lane turns red
//!                 and the next lane (round-robin) turns green.
//!   ⑤ History   — if enabled, record per-lane queue lengths, the green
//!                 lane and any rate estimates.
//! ```
//!
//! Exactly one lane is green at every tick boundary.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs independent trials on Rayon's thread pool.        |
//! | `serde`    | Serde derives on `TrialConfig` and friends.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_sim::{ControllerBuilder, ControllerConfig, NoopObserver, Population, Termination};
//! use ts_strategy::ConstantStrategy;
//!
//! let population = Population::Prepopulated {
//!     lanes: 3, num_vehicles: 1_000, arrival_rate_per_minute: 30.0,
//! };
//! let mut controller =
//!     ControllerBuilder::new(ControllerConfig::default(), population, ConstantStrategy::new(20))
//!         .build()?;
//! controller.run(Termination::Drained, None, &mut NoopObserver)?;
//! println!("average frustration {:.2}", controller.average_frustration()?);
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod observer;
pub mod trial;


pub use builder::ControllerBuilder;
pub use config::{ControllerConfig, Population, RunConfig, Termination, TrialConfig};
pub use controller::Controller;
pub use error::{SimError, SimResult};
pub use history::History;
pub use observer::{NoopObserver, SimObserver};
pub use trial::{FrustrationStats, TrialSummary, run_trial, run_trial_with, run_trials};
