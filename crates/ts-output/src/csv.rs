//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `lane_ticks.csv`
//! - `trial_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{LaneTickRow, OutputResult, TrialSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    lane_ticks: Writer<File>,
    summaries:  Writer<File>,
    /// Rows written since the last flush.
    dirty:      bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut lane_ticks = Writer::from_path(dir.join("lane_ticks.csv"))?;
        lane_ticks.write_record([
            "tick", "lane", "active", "passed", "is_green", "wait_time", "rate_estimate",
        ])?;

        let mut summaries = Writer::from_path(dir.join("trial_summaries.csv"))?;
        summaries.write_record([
            "trial",
            "strategy",
            "seed",
            "final_tick",
            "num_vehicles",
            "num_passed",
            "num_active",
            "switches",
            "total_frustration",
            "average_frustration",
        ])?;

        Ok(Self { lane_ticks, summaries, dirty: true })
    }
}

fn opt_f64(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_lane_rows(&mut self, rows: &[LaneTickRow]) -> OutputResult<()> {
        for row in rows {
            self.lane_ticks.write_record(&[
                row.tick.to_string(),
                row.lane.to_string(),
                row.active.to_string(),
                row.passed.to_string(),
                (row.is_green as u8).to_string(),
                row.wait_time.to_string(),
                opt_f64(row.rate_estimate),
            ])?;
        }
        self.dirty = true;
        Ok(())
    }

    fn write_trial_summary(&mut self, row: &TrialSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.trial.to_string(),
            row.strategy.clone(),
            row.seed.to_string(),
            row.final_tick.to_string(),
            row.num_vehicles.to_string(),
            row.num_passed.to_string(),
            row.num_active.to_string(),
            row.switches.to_string(),
            row.total_frustration.to_string(),
            opt_f64(row.average_frustration),
        ])?;
        self.dirty = true;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        self.lane_ticks.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
