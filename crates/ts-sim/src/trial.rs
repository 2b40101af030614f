//! Independent trials and summary statistics across them.
//!
//! Every trial builds its own controller from a shared [`TrialConfig`] and a
//! seed derived from the run seed and the trial id, so trials never share
//! state and results do not depend on execution order.  With the `parallel`
//! feature, trials run on Rayon's thread pool.

use log::info;
use ts_core::{Tick, TrialId, trial_seed};
use ts_strategy::{Strategy, SwitchStrategy};

use crate::{
    Controller, ControllerBuilder, NoopObserver, RunConfig, SimError, SimObserver, SimResult,
    TrialConfig,
};

// ── TrialSummary ──────────────────────────────────────────────────────────────

/// End-of-run metrics for a single trial.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialSummary {
    pub trial:               TrialId,
    pub strategy:            &'static str,
    pub seed:                u64,
    pub final_tick:          Tick,
    pub num_vehicles:        usize,
    pub num_passed:          usize,
    pub num_active:          usize,
    pub switches:            usize,
    pub total_frustration:   f64,
    /// `total_frustration / num_passed`; `None` when no vehicle departed.
    pub average_frustration: Option<f64>,
}

impl TrialSummary {
    pub fn from_controller<S: SwitchStrategy>(trial: TrialId, controller: &Controller<S>) -> Self {
        Self {
            trial,
            strategy:            controller.strategy().name(),
            seed:                controller.config.seed,
            final_tick:          controller.now(),
            num_vehicles:        controller.num_vehicles(),
            num_passed:          controller.num_passed(),
            num_active:          controller.num_active(),
            switches:            controller.switch_log().len(),
            total_frustration:   controller.total_frustration(),
            average_frustration: controller.average_frustration().ok(),
        }
    }
}

// ── Running trials ────────────────────────────────────────────────────────────

/// Run one trial to completion.
pub fn run_trial(config: &TrialConfig, trial: TrialId, run_seed: u64) -> SimResult<TrialSummary> {
    run_trial_with(config, trial, run_seed, &mut NoopObserver).map(|(summary, _)| summary)
}

/// Run one trial with an observer attached, returning the finished
/// controller alongside its summary (for history or per-lane inspection).
pub fn run_trial_with<O: SimObserver>(
    config:   &TrialConfig,
    trial:    TrialId,
    run_seed: u64,
    observer: &mut O,
) -> SimResult<(TrialSummary, Controller<Strategy>)> {
    config.validate()?;

    let mut controller_config = config.controller.clone();
    controller_config.seed = trial_seed(run_seed, trial);

    let strategy = config.strategy.build()?;
    info!("{trial} [{}]: start, seed {}", strategy.name(), controller_config.seed);
    let mut controller =
        ControllerBuilder::new(controller_config, config.population.clone(), strategy)
            .frustration(config.frustration)
            .build()?;

    controller.run(config.termination, config.max_ticks, observer)?;

    let summary = TrialSummary::from_controller(trial, &controller);
    info!(
        "{trial} [{}]: {} of {} vehicles passed by {}, average frustration {}",
        summary.strategy,
        summary.num_passed,
        summary.num_vehicles,
        summary.final_tick,
        summary
            .average_frustration
            .map_or_else(|| "n/a".to_string(), |f| format!("{f:.3}")),
    );
    Ok((summary, controller))
}

/// Run `run.trials` independent trials, returned in trial-id order.
///
/// A failing trial does not stop the others; its error sits in its slot.
#[cfg(not(feature = "parallel"))]
pub fn run_trials(config: &TrialConfig, run: &RunConfig) -> SimResult<Vec<SimResult<TrialSummary>>> {
    Ok((0..run.trials).map(|i| run_trial(config, TrialId(i), run.seed)).collect())
}

/// Run `run.trials` independent trials, returned in trial-id order.
///
/// A failing trial does not stop the others; its error sits in its slot.
#[cfg(feature = "parallel")]
pub fn run_trials(config: &TrialConfig, run: &RunConfig) -> SimResult<Vec<SimResult<TrialSummary>>> {
    use rayon::prelude::*;

    let work = || -> Vec<SimResult<TrialSummary>> {
        (0..run.trials)
            .into_par_iter()
            .map(|i| run_trial(config, TrialId(i), run.seed))
            .collect()
    };

    match run.num_threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}

// ── FrustrationStats ──────────────────────────────────────────────────────────

/// Spread of per-trial average frustration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrustrationStats {
    /// Trials that contributed an average.
    pub count:   usize,
    /// Trials skipped because no vehicle departed.
    pub skipped: usize,
    pub mean:    f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min:     f64,
    pub max:     f64,
}

impl FrustrationStats {
    pub fn from_summaries(summaries: &[TrialSummary]) -> SimResult<Self> {
        let values: Vec<f64> = summaries.iter().filter_map(|s| s.average_frustration).collect();
        if values.is_empty() {
            return Err(SimError::NoCompletedVehicles);
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok(Self {
            count:   values.len(),
            skipped: summaries.len() - values.len(),
            mean,
            std_dev: var.sqrt(),
            min:     values.iter().copied().fold(f64::INFINITY, f64::min),
            max:     values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
