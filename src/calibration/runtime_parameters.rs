use std::fmt;
use serde::{Deserialize, Serialize};
use color_eyre::eyre::{Result, ensure};
use crate::{Float, float};
use super::{candidate::CandidateGenerator, error_model::ErrorModel};

/**
 * Run parameters of a calibration. Every field falls back to its default when missing from the YAML.
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CalibrationRuntimeParameters {
    /// Must be a positive multiple of 4: each survivor of the best quarter fills four slots.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[serde(default = "default_generation_count")]
    pub generation_count: usize,
    #[serde(default = "default_initial_annealing")]
    pub initial_annealing: Float,
    #[serde(default)]
    pub final_annealing: Float,
    /// Annealing of the extra generation run after the schedule to report the final population's best.
    #[serde(default = "default_final_annealing_pass")]
    pub final_annealing_pass: Float,
    #[serde(default = "default_initial_translation_sigma")]
    pub initial_translation_sigma: Float,
    #[serde(default = "default_mutation_translation_sigma")]
    pub mutation_translation_sigma: Float,
    #[serde(default = "default_mutation_rotation_sigma")]
    pub mutation_rotation_sigma: Float,
    /// Metres per radian when summing translation and rotation error.
    #[serde(default = "default_rotation_weight")]
    pub rotation_weight: Float,
    /// Fixed seed for reproducible runs, entropy seeded otherwise.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Score candidates on the rayon thread pool.
    #[serde(default = "default_use_parallel")]
    pub use_parallel: bool
}

fn default_population_size() -> usize {
    1024
}

fn default_generation_count() -> usize {
    64
}

fn default_initial_annealing() -> Float {
    2.0
}

fn default_final_annealing_pass() -> Float {
    1.0
}

fn default_initial_translation_sigma() -> Float {
    0.5 // m
}

fn default_mutation_translation_sigma() -> Float {
    0.1 // m
}

fn default_mutation_rotation_sigma() -> Float {
    float::consts::PI/8.0
}

fn default_rotation_weight() -> Float {
    1.0
}

fn default_use_parallel() -> bool {
    true
}

impl Default for CalibrationRuntimeParameters {
    fn default() -> CalibrationRuntimeParameters {
        CalibrationRuntimeParameters {
            population_size: default_population_size(),
            generation_count: default_generation_count(),
            initial_annealing: default_initial_annealing(),
            final_annealing: 0.0,
            final_annealing_pass: default_final_annealing_pass(),
            initial_translation_sigma: default_initial_translation_sigma(),
            mutation_translation_sigma: default_mutation_translation_sigma(),
            mutation_rotation_sigma: default_mutation_rotation_sigma(),
            rotation_weight: default_rotation_weight(),
            seed: None,
            use_parallel: default_use_parallel()
        }
    }
}

impl CalibrationRuntimeParameters {

    pub fn validate(&self) -> Result<()> {
        validate_population_size(self.population_size)?;
        ensure!(self.generation_count > 0, "generation count must be positive");
        for (name, value) in [
            ("initial_annealing", self.initial_annealing),
            ("final_annealing", self.final_annealing),
            ("final_annealing_pass", self.final_annealing_pass),
            ("initial_translation_sigma", self.initial_translation_sigma),
            ("mutation_translation_sigma", self.mutation_translation_sigma),
            ("mutation_rotation_sigma", self.mutation_rotation_sigma),
            ("rotation_weight", self.rotation_weight)].iter() {
            ensure!(value.is_finite() && *value >= 0.0, "{} must be finite and non-negative, got {}", name, value);
        }
        Ok(())
    }

    /**
     * Linear schedule from initial_annealing at generation 0 towards final_annealing at generation_count.
     */
    pub fn annealing(&self, generation: usize) -> Float {
        let progress = generation as Float / self.generation_count as Float;
        self.initial_annealing + (self.final_annealing - self.initial_annealing)*progress
    }

    pub fn annealing_schedule(&self) -> Vec<Float> {
        (0..self.generation_count).map(|i| self.annealing(i)).collect::<Vec<Float>>()
    }

    pub fn candidate_generator(&self) -> CandidateGenerator {
        CandidateGenerator::new(self.initial_translation_sigma, self.mutation_translation_sigma, self.mutation_rotation_sigma)
    }

    pub fn error_model(&self) -> ErrorModel {
        ErrorModel::new(self.rotation_weight)
    }
}

pub fn validate_population_size(population_size: usize) -> Result<()> {
    ensure!(population_size > 0 && population_size % 4 == 0, "population size must be a positive multiple of 4, got {}", population_size);
    Ok(())
}

impl fmt::Display for CalibrationRuntimeParameters {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        let mut display = String::from(format!("pop_{}_gen_{}_a_{:+e}_{:+e}_w_{:+e}",self.population_size,self.generation_count,self.initial_annealing,self.final_annealing,self.rotation_weight));
        display.push_str(format!("_s_t_{:+e}_s_m_{:+e}_{:+e}",self.initial_translation_sigma,self.mutation_translation_sigma,self.mutation_rotation_sigma).as_str());
        match self.seed {
            Some(seed) => display.push_str(format!("_seed_{}",seed).as_str()),
            None => ()
        };
        write!(f, "{}", display)
    }

}
