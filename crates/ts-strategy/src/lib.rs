//! `ts-strategy` — when should the green light move on?
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`context`]  | `SwitchContext<'a>` — clock, lanes and active index for a tick |
//! | [`model`]    | `SwitchStrategy` trait                                         |
//! | [`constant`] | `ConstantStrategy` — fixed green duration                      |
//! | [`idle`]     | `IdleStrategy` — fixed ceiling, early switch on an empty lane  |
//! | [`snapshot`] | `SnapshotStrategy` — per-cycle green shares from arrival rates |
//! | [`optimize`] | Projected-gradient solver for the green-share problem          |
//! | [`config`]   | `StrategyConfig` (validated) and the closed `Strategy` enum    |
//! | [`error`]    | `StrategyError`, `OptimizeError`                               |
//!
//! # Design notes
//!
//! The controller calls [`SwitchStrategy::should_switch`] once per tick,
//! after admissions and departures.  Strategies read the clock and lanes
//! through the context; adaptive strategies may also write each lane's
//! `wait_time` and `rate_estimate`.  They never advance the clock or move
//! vehicles.

pub mod config;
pub mod constant;
pub mod context;
pub mod error;
pub mod idle;
pub mod model;
pub mod optimize;
pub mod snapshot;


pub use config::{Strategy, StrategyConfig};
pub use constant::ConstantStrategy;
pub use context::SwitchContext;
pub use error::{OptimizeError, StrategyError, StrategyResult};
pub use idle::IdleStrategy;
pub use model::SwitchStrategy;
pub use optimize::{Allocation, OptimizeOptions, equal_split, solve_allocation};
pub use snapshot::SnapshotStrategy;
