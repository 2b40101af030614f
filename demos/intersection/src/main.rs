//! intersection — compare traffic-light switching policies by Monte-Carlo.
//!
//! Runs every scenario of a JSON scenario file (or the built-in set) for
//! `trials` independent trials and prints the spread of per-trial average
//! frustration.  With `--output`, trial 0 of each scenario also writes
//! per-lane tick rows and every trial's summary to CSV.

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use ts_core::TrialId;
use ts_output::{CsvWriter, OutputWriter, SimOutputObserver, TrialSummaryRow};
use ts_sim::{FrustrationStats, RunConfig, TrialSummary, run_trial_with, run_trials};

use scenario::{Scenario, ScenarioFile};

#[derive(Parser)]
#[command(name = "intersection")]
#[command(about = "Traffic-light strategy comparison by Monte-Carlo simulation")]
struct Cli {
    /// JSON scenario file; the built-in comparison set is used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of trials per scenario.
    #[arg(long)]
    trials: Option<u32>,

    /// Override the root seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (default: all logical cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Run only the scenario with this name.
    #[arg(long)]
    scenario: Option<String>,

    /// Directory for CSV output, one sub-directory per scenario.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the effective scenario file as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

// ── Per-scenario result ───────────────────────────────────────────────────────

struct Outcome {
    name:     String,
    strategy: &'static str,
    failed:   usize,
    stats:    Option<FrustrationStats>,
    elapsed:  f64,
}

fn run_scenario(
    scenario:  &Scenario,
    run:       &RunConfig,
    interval:  u64,
    output:    Option<&Path>,
) -> Result<Outcome> {
    scenario
        .trial
        .validate()
        .with_context(|| format!("scenario {}", scenario.name))?;

    let t0 = Instant::now();
    let mut summaries: Vec<TrialSummary> = Vec::with_capacity(run.trials as usize);
    let mut failed = 0;
    for (i, result) in run_trials(&scenario.trial, run)?.into_iter().enumerate() {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                warn!("{}: trial {i} failed: {e}", scenario.name);
                failed += 1;
            }
        }
    }
    let elapsed = t0.elapsed().as_secs_f64();

    if let Some(dir) = output {
        write_csv(scenario, run, interval, &summaries, &dir.join(&scenario.name))?;
    }

    let stats = match FrustrationStats::from_summaries(&summaries) {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("{}: {e}", scenario.name);
            None
        }
    };

    Ok(Outcome {
        name: scenario.name.clone(),
        strategy: scenario.trial.strategy.name(),
        failed,
        stats,
        elapsed,
    })
}

/// Replay trial 0 with a CSV observer, then append every trial's summary.
fn write_csv(
    scenario:  &Scenario,
    run:       &RunConfig,
    interval:  u64,
    summaries: &[TrialSummary],
    dir:       &Path,
) -> Result<()> {
    let writer = CsvWriter::new(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut obs = SimOutputObserver::new(writer, interval);
    run_trial_with(&scenario.trial, TrialId(0), run.seed, &mut obs)?;
    if let Some(e) = obs.take_error() {
        bail!("writing lane rows for {}: {e}", scenario.name);
    }

    let mut writer = obs.into_writer();
    for summary in summaries {
        writer.write_trial_summary(&TrialSummaryRow::from(summary))?;
    }
    writer.finish()?;
    info!("{}: wrote {}", scenario.name, dir.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut file = match &cli.config {
        Some(path) => ScenarioFile::load(path)?,
        None => ScenarioFile::builtin()?,
    };
    if let Some(trials) = cli.trials {
        file.run.trials = trials;
    }
    if let Some(seed) = cli.seed {
        file.run.seed = seed;
    }
    if cli.threads.is_some() {
        file.run.num_threads = cli.threads;
    }
    if let Some(name) = &cli.scenario {
        file.scenarios.retain(|s| &s.name == name);
        if file.scenarios.is_empty() {
            bail!("no scenario named {name:?}");
        }
    }

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }

    println!("=== intersection — traffic-light strategy comparison ===");
    println!(
        "Scenarios: {}  |  Trials: {}  |  Seed: {}",
        file.scenarios.len(),
        file.run.trials,
        file.run.seed
    );
    println!();

    let mut outcomes = Vec::with_capacity(file.scenarios.len());
    for scenario in &file.scenarios {
        info!("running {} ({} trials)", scenario.name, file.run.trials);
        outcomes.push(run_scenario(
            scenario,
            &file.run,
            file.output_interval_ticks,
            cli.output.as_deref(),
        )?);
    }

    println!(
        "{:<22} {:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>8}",
        "Scenario", "Strategy", "Trials", "Mean", "Std", "Min", "Max", "Secs"
    );
    println!("{}", "-".repeat(94));
    for o in &outcomes {
        match &o.stats {
            Some(s) => println!(
                "{:<22} {:<10} {:>6} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>8.2}",
                o.name, o.strategy, s.count, s.mean, s.std_dev, s.min, s.max, o.elapsed
            ),
            None => println!(
                "{:<22} {:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>8.2}",
                o.name, o.strategy, 0, "n/a", "n/a", "n/a", "n/a", o.elapsed
            ),
        }
        if o.failed > 0 {
            println!("  ({} trials failed)", o.failed);
        }
    }

    Ok(())
}
