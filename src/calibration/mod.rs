extern crate rand;

use std::sync::atomic::{AtomicBool, Ordering};
use rand::Rng;
use log::{debug, info, warn};
use color_eyre::eyre::Result;
use crate::Float;
use crate::numerics::pose::RigidTransform;
use self::observation::RelativePoseObservation;
use self::population::Population;
use self::runtime_parameters::CalibrationRuntimeParameters;

pub mod observation;
pub mod error_model;
pub mod candidate;
pub mod population;
pub mod runtime_parameters;
pub mod report;

#[derive(Debug,Clone)]
pub struct CalibrationResult {
    /// T_odom<-reg: maps registration frame coordinates into the odometry frame.
    pub transform: RigidTransform,
    pub score: Float,
    /// Best score of every generation, including the final reporting pass.
    pub history: Vec<Float>,
    pub generations_run: usize,
    pub observation_count: usize,
    pub aborted: bool
}

pub fn calibrate<R: Rng + ?Sized>(observations: &[RelativePoseObservation], runtime_parameters: &CalibrationRuntimeParameters, rng: &mut R) -> Result<CalibrationResult> {
    calibrate_with_abort(observations, runtime_parameters, rng, &AtomicBool::new(false))
}

/**
 * Runs the annealing schedule followed by one reporting generation.
 * `abort` is only checked between generations. An aborted run still returns the best candidate seen so far.
 */
pub fn calibrate_with_abort<R: Rng + ?Sized>(observations: &[RelativePoseObservation], runtime_parameters: &CalibrationRuntimeParameters, rng: &mut R, abort: &AtomicBool) -> Result<CalibrationResult> {
    runtime_parameters.validate()?;
    if observations.is_empty() {
        warn!("No observations: every candidate scores 0 and the result carries no calibration information");
    }

    let mut population = Population::random(
        runtime_parameters.population_size,
        runtime_parameters.candidate_generator(),
        runtime_parameters.error_model(),
        rng)?.with_parallel(runtime_parameters.use_parallel);

    info!("Calibrating with {} observations: {}", observations.len(), runtime_parameters);

    let mut history = Vec::<Float>::with_capacity(runtime_parameters.generation_count + 1);
    let mut best: Option<(RigidTransform, Float)> = None;
    let mut aborted = false;

    for generation in 0..runtime_parameters.generation_count {
        if abort.load(Ordering::Relaxed) {
            warn!("Calibration aborted before generation {}", generation);
            aborted = true;
            break;
        }
        let annealing = runtime_parameters.annealing(generation);
        let result = population.run_generation(observations, annealing, rng);
        info!("{} best has error {}", generation, result.best_score);
        debug!("generation: {}, annealing: {}, mean error: {}", generation, annealing, result.mean_score);
        history.push(result.best_score);
        best = keep_better(best, (result.best, result.best_score));
    }

    if !aborted {
        let result = population.run_generation(observations, runtime_parameters.final_annealing_pass, rng);
        history.push(result.best_score);
        best = keep_better(best, (result.best, result.best_score));
    }

    let (transform, score) = best.unwrap_or_else(|| {
        let first = population.candidates()[0];
        (first, population.error_model().aggregate_score(&first, observations))
    });

    Ok(CalibrationResult {
        transform,
        score,
        generations_run: history.len(),
        history,
        observation_count: observations.len(),
        aborted
    })
}

fn keep_better(current: Option<(RigidTransform, Float)>, candidate: (RigidTransform, Float)) -> Option<(RigidTransform, Float)> {
    match current {
        Some((_, score)) if score <= candidate.1 => current,
        _ => Some(candidate)
    }
}
