//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ts_core::{LaneId, SimClock, Tick};
use ts_lane::Lane;
use ts_sim::SimObserver;

use crate::row::LaneTickRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes one row per lane every `interval_ticks`
/// ticks to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `controller.run()` returns, check
/// for errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    interval_ticks: u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// `interval_ticks == 0` disables lane rows; the writer is still
    /// finished at the end of the run.
    pub fn new(writer: W, interval_ticks: u64) -> Self {
        Self { writer, interval_ticks, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwrap the inner writer (e.g. to append trial summaries).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, clock: &SimClock, lanes: &[Lane], _active: LaneId) {
        if self.interval_ticks == 0 || !clock.now().0.is_multiple_of(self.interval_ticks) {
            return;
        }
        let rows: Vec<LaneTickRow> = lanes.iter().map(|l| LaneTickRow::from_lane(clock, l)).collect();
        let result = self.writer.write_lane_rows(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
