//! Driver loop for a [`Population`].
//!
//! [`EvolutionRunner`] repeats [`Population::step`] until the target is
//! matched, an optional generation cap is reached, the cancellation flag is
//! raised, or the observer asks to stop. The observer is the hook where a
//! caller renders progress or yields to its own scheduler between steps.

use super::population::Population;
use crate::error::Result;
use log::info;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Limits applied by [`EvolutionRunner`].
///
/// Without a generation cap, a target containing characters the alphabet
/// cannot produce runs forever.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Maximum number of steps to run in this call.
    pub max_generations: Option<usize>,

    /// Stops the loop before the next step once set to `true`.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl RunOptions {
    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the cancellation flag.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Outcome of an [`EvolutionRunner`] call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Best phrase at the end of the run.
    pub best: String,

    /// Generations completed by the population (including earlier runs).
    pub generations: usize,

    /// Whether the target was matched.
    pub finished: bool,

    /// Whether the run stopped on the cancellation flag.
    pub cancelled: bool,

    /// Whether the run stopped on `max_generations`.
    pub capped: bool,

    /// Whether the observer stopped the run.
    pub interrupted: bool,

    /// Average fitness after each step taken in this call.
    pub average_fitness_history: Vec<f64>,
}

/// Executes the generation loop.
///
/// # Usage
///
/// ```
/// use std::ops::ControlFlow;
/// use string_evolution::ga::{EvolutionConfig, EvolutionRunner, Population, RunOptions};
///
/// let config = EvolutionConfig::new("Hi").with_population_size(100).with_seed(3);
/// let mut population = Population::from_config(&config).unwrap();
/// let options = RunOptions::default().with_max_generations(10_000);
///
/// let result = EvolutionRunner::run(&mut population, &options, |population| {
///     println!("{}: {}", population.generations(), population.best());
///     ControlFlow::Continue(())
/// })
/// .unwrap();
/// assert!(result.finished || result.capped);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Steps `population` until it finishes or `options` stop it.
    pub fn run_to_completion(
        population: &mut Population,
        options: &RunOptions,
    ) -> Result<RunResult> {
        Self::run(population, options, |_| ControlFlow::Continue(()))
    }

    /// Steps `population`, handing it to `observer` after each step.
    ///
    /// The observer only gets shared access, so it can read every query
    /// (best phrase, average fitness, all phrases) but cannot step.
    ///
    /// `is_finished` is checked before every step, so a population that is
    /// already finished is returned untouched.
    pub fn run<F>(
        population: &mut Population,
        options: &RunOptions,
        mut observer: F,
    ) -> Result<RunResult>
    where
        F: FnMut(&Population) -> ControlFlow<()>,
    {
        let mut history = Vec::new();
        let mut cancelled = false;
        let mut capped = false;
        let mut interrupted = false;
        let mut steps = 0usize;

        while !population.is_finished() {
            if let Some(ref flag) = options.cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if options.max_generations.is_some_and(|max| steps >= max) {
                capped = true;
                break;
            }

            population.step()?;
            steps += 1;

            history.push(population.average_fitness());
            if observer(population).is_break() {
                interrupted = true;
                break;
            }
        }

        if cancelled || capped {
            info!(
                "run stopped after {} generations without a match (best {:?})",
                population.generations(),
                population.best()
            );
        }

        Ok(RunResult {
            best: population.best().to_string(),
            generations: population.generations(),
            finished: population.is_finished(),
            cancelled,
            capped,
            interrupted,
            average_fitness_history: history,
        })
    }
}
