//! Integration tests for ts-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{LaneTickRow, TrialSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn lane_row(tick: u64, lane: u16, rate_estimate: Option<f64>) -> LaneTickRow {
        LaneTickRow {
            tick,
            lane,
            active:    3,
            passed:    7,
            is_green:  lane == 0,
            wait_time: 20,
            rate_estimate,
        }
    }

    fn summary_row(trial: u32, average: Option<f64>) -> TrialSummaryRow {
        TrialSummaryRow {
            trial,
            strategy:            "idle".into(),
            seed:                11,
            final_tick:          500,
            num_vehicles:        100,
            num_passed:          100,
            num_active:          0,
            switches:            12,
            total_frustration:   42.5,
            average_frustration: average,
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("lane_ticks.csv").exists());
        assert!(dir.path().join("trial_summaries.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("lane_ticks.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("lane_ticks.csv")),
            ["tick", "lane", "active", "passed", "is_green", "wait_time", "rate_estimate"]
        );
        assert_eq!(headers(dir.path().join("trial_summaries.csv"))[0], "trial");
        assert_eq!(headers(dir.path().join("trial_summaries.csv")).len(), 10);
    }

    #[test]
    fn lane_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_lane_rows(&[lane_row(5, 0, Some(2.5)), lane_row(5, 1, None)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("lane_ticks.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5");   // tick
        assert_eq!(&rows[0][4], "1");   // is_green
        assert_eq!(&rows[0][6], "2.5"); // rate_estimate
        assert_eq!(&rows[1][1], "1");
        assert_eq!(&rows[1][4], "0");
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn trial_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trial_summary(&summary_row(0, Some(1.25))).unwrap();
        w.write_trial_summary(&summary_row(1, None)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trial_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "idle");
        assert_eq!(&rows[0][9], "1.25");
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][9], "");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use ts_core::TrialId;
    use ts_sim::{
        ControllerBuilder, ControllerConfig, Population, Termination, TrialConfig, run_trial_with,
    };
    use ts_strategy::{ConstantStrategy, StrategyConfig};

    use crate::{CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver};
    use crate::row::{LaneTickRow, TrialSummaryRow};

    fn population() -> Population {
        Population::Prepopulated { lanes: 3, num_vehicles: 60, arrival_rate_per_minute: 30.0 }
    }

    /// Collects rows in memory and fails on demand.
    #[derive(Default)]
    struct MemoryWriter {
        rows:      Vec<LaneTickRow>,
        finishes:  usize,
        fail_from: Option<u64>,
    }

    impl OutputWriter for MemoryWriter {
        fn write_lane_rows(&mut self, rows: &[LaneTickRow]) -> OutputResult<()> {
            if let Some(tick) = self.fail_from {
                if rows.first().is_some_and(|r| r.tick >= tick) {
                    return Err(OutputError::Io(std::io::Error::other(format!("fail at {tick}"))));
                }
            }
            self.rows.extend_from_slice(rows);
            Ok(())
        }

        fn write_trial_summary(&mut self, _row: &TrialSummaryRow) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn rows_every_interval() {
        let mut c = ControllerBuilder::new(ControllerConfig::default(), population(), ConstantStrategy::new(10))
            .build()
            .unwrap();
        let mut obs = SimOutputObserver::new(MemoryWriter::default(), 10);
        let end = c.run(Termination::Ticks { ticks: 50 }, None, &mut obs).unwrap();
        assert_eq!(end.0, 50);
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.finishes, 1);
        assert_eq!(w.rows.len(), 5 * 3);
        assert!(w.rows.iter().all(|r| r.tick % 10 == 0));
        for chunk in w.rows.chunks(3) {
            assert_eq!(chunk.iter().filter(|r| r.is_green).count(), 1);
            assert_eq!(chunk[2].lane_id().index(), 2);
        }
    }

    #[test]
    fn zero_interval_writes_no_rows() {
        let mut c = ControllerBuilder::new(ControllerConfig::default(), population(), ConstantStrategy::new(10))
            .build()
            .unwrap();
        let mut obs = SimOutputObserver::new(MemoryWriter::default(), 0);
        c.run(Termination::Ticks { ticks: 20 }, None, &mut obs).unwrap();
        let w = obs.into_writer();
        assert!(w.rows.is_empty());
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut c = ControllerBuilder::new(ControllerConfig::default(), population(), ConstantStrategy::new(10))
            .build()
            .unwrap();
        let writer = MemoryWriter { fail_from: Some(20), ..MemoryWriter::default() };
        let mut obs = SimOutputObserver::new(writer, 10);
        c.run(Termination::Ticks { ticks: 40 }, None, &mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("fail at 20"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().rows.len(), 3);
    }

    #[test]
    fn trial_to_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let config = TrialConfig {
            controller:  ControllerConfig::default(),
            population:  population(),
            strategy:    StrategyConfig::Idle { wait_time: 20, idle_time: 5 },
            frustration: Default::default(),
            termination: Termination::Drained,
            max_ticks:   Some(100_000),
        };

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), 1);
        let (summary, _) = run_trial_with(&config, TrialId(0), 5, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        let mut writer = obs.into_writer();
        writer.write_trial_summary(&TrialSummaryRow::from(&summary)).unwrap();
        writer.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("lane_ticks.csv")).unwrap();
        let rows = rdr.records().count() as u64;
        assert_eq!(rows, summary.final_tick.0 * 3);

        let mut rdr = csv::Reader::from_path(dir.path().join("trial_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "idle");
        assert_eq!(&rows[0][5], "60");
    }
}
