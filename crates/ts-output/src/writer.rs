//! The `OutputWriter` trait implemented by all backend writers.

use crate::{LaneTickRow, OutputResult, TrialSummaryRow};

/// Trait implemented by output backends.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver], errors are
/// stored internally and retrieved with
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of per-lane rows (typically all lanes at one tick).
    fn write_lane_rows(&mut self, rows: &[LaneTickRow]) -> OutputResult<()>;

    /// Write one trial summary row.
    fn write_trial_summary(&mut self, row: &TrialSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.  Rows written after `finish` are flushed by the next call.
    fn finish(&mut self) -> OutputResult<()>;
}
