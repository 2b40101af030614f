//! `ts-output` — output writers for the traffic-signal simulator.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `lane_ticks.csv`, `trial_summaries.csv`    |
//!
//! Backends implement [`OutputWriter`].  Per-tick lane rows are produced by
//! [`SimOutputObserver`], which implements `ts_sim::SimObserver`; trial
//! summaries are written directly by the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 10);
//! controller.run(Termination::Drained, None, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{LaneTickRow, TrialSummaryRow};
pub use writer::OutputWriter;
