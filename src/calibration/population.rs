extern crate rand;
extern crate rayon;

use rand::Rng;
use rayon::prelude::*;
use color_eyre::eyre::Result;
use crate::Float;
use crate::numerics::pose::RigidTransform;
use super::{candidate::CandidateGenerator, error_model::ErrorModel, observation::RelativePoseObservation};
use super::runtime_parameters::validate_population_size;

/// Each survivor fills this many consecutive slots: itself followed by mutated copies.
pub const SLOTS_PER_SURVIVOR: usize = 4;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GenerationResult {
    pub best: RigidTransform,
    pub best_score: Float,
    pub best_index: usize,
    pub mean_score: Float
}

/**
 * Fixed size set of calibration candidates evolved by truncation selection.
 * The size is a positive multiple of SLOTS_PER_SURVIVOR, checked on construction.
 */
#[derive(Debug,Clone)]
pub struct Population {
    candidates: Vec<RigidTransform>,
    generator: CandidateGenerator,
    error_model: ErrorModel,
    use_parallel: bool
}

impl Population {

    pub fn new(candidates: Vec<RigidTransform>, generator: CandidateGenerator, error_model: ErrorModel) -> Result<Population> {
        validate_population_size(candidates.len())?;
        Ok(Population { candidates, generator, error_model, use_parallel: true })
    }

    pub fn random<R: Rng + ?Sized>(size: usize, generator: CandidateGenerator, error_model: ErrorModel, rng: &mut R) -> Result<Population> {
        validate_population_size(size)?;
        let candidates = generator.random_population(size, rng);
        Population::new(candidates, generator, error_model)
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Population {
        self.use_parallel = use_parallel;
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self) -> &[RigidTransform] {
        &self.candidates
    }

    pub fn survivor_count(&self) -> usize {
        self.candidates.len() / SLOTS_PER_SURVIVOR
    }

    pub fn error_model(&self) -> &ErrorModel {
        &self.error_model
    }

    /**
     * Aggregate score of every candidate, in population order.
     */
    pub fn evaluate(&self, observations: &[RelativePoseObservation]) -> Vec<Float> {
        let error_model = &self.error_model;
        match self.use_parallel {
            true => self.candidates.par_iter().map(|candidate| error_model.aggregate_score(candidate, observations)).collect::<Vec<Float>>(),
            false => self.candidates.iter().map(|candidate| error_model.aggregate_score(candidate, observations)).collect::<Vec<Float>>()
        }
    }

    /**
     * Candidate indices by ascending score. The sort is stable so ties keep population order.
     */
    pub fn rank(scores: &[Float]) -> Vec<usize> {
        let mut ranking = (0..scores.len()).collect::<Vec<usize>>();
        ranking.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        ranking
    }

    /**
     * Evaluates, keeps the best quarter and replaces the population with each survivor followed by three independent mutations of it.
     * The reported best is taken from the evaluated population, before reproduction.
     */
    pub fn run_generation<R: Rng + ?Sized>(&mut self, observations: &[RelativePoseObservation], annealing: Float, rng: &mut R) -> GenerationResult {
        let scores = self.evaluate(observations);
        let ranking = Population::rank(&scores);

        let best_index = ranking[0];
        let result = GenerationResult {
            best: self.candidates[best_index],
            best_score: scores[best_index],
            best_index,
            mean_score: scores.iter().sum::<Float>() / scores.len() as Float
        };

        let mut next_generation = Vec::<RigidTransform>::with_capacity(self.candidates.len());
        for &survivor_index in ranking.iter().take(self.survivor_count()) {
            let survivor = self.candidates[survivor_index];
            next_generation.push(survivor);
            for _ in 1..SLOTS_PER_SURVIVOR {
                next_generation.push(self.generator.mutate(&survivor, annealing, rng));
            }
        }
        self.candidates = next_generation;

        result
    }
}
