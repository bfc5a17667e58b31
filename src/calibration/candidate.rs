extern crate nalgebra as na;
extern crate rand;
extern crate rand_distr;

use na::{Vector3, UnitQuaternion, Unit};
use rand::Rng;
use rand_distr::StandardNormal;
use crate::{Float, float};
use crate::numerics::pose::{RigidTransform, from_parts, renormalize};

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum MutationKind {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ
}

impl MutationKind {
    pub const ALL: [MutationKind; 6] = [
        MutationKind::TranslateX, MutationKind::TranslateY, MutationKind::TranslateZ,
        MutationKind::RotateX, MutationKind::RotateY, MutationKind::RotateZ
    ];

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> MutationKind {
        MutationKind::ALL[rng.gen_range(0..MutationKind::ALL.len())]
    }

    fn axis(&self) -> Unit<Vector3<Float>> {
        match self {
            MutationKind::TranslateX | MutationKind::RotateX => Vector3::x_axis(),
            MutationKind::TranslateY | MutationKind::RotateY => Vector3::y_axis(),
            MutationKind::TranslateZ | MutationKind::RotateZ => Vector3::z_axis()
        }
    }
}

/**
 * Draws initial calibration candidates and perturbs existing ones.
 * All sigmas of the perturbations are scaled by the annealing amount passed to mutate.
 */
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CandidateGenerator {
    pub initial_translation_sigma: Float,
    pub mutation_translation_sigma: Float,
    pub mutation_rotation_sigma: Float
}

impl Default for CandidateGenerator {
    fn default() -> CandidateGenerator {
        CandidateGenerator {
            initial_translation_sigma: 0.5,
            mutation_translation_sigma: 0.1,
            mutation_rotation_sigma: float::consts::PI/8.0
        }
    }
}

pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: Float, sigma: Float) -> Float {
    let z: Float = rng.sample(StandardNormal);
    mean + sigma*z
}

impl CandidateGenerator {

    pub fn new(initial_translation_sigma: Float, mutation_translation_sigma: Float, mutation_rotation_sigma: Float) -> CandidateGenerator {
        CandidateGenerator { initial_translation_sigma, mutation_translation_sigma, mutation_rotation_sigma }
    }

    /**
     * Gaussian translation. The rotation is Rx*Ry*Rz with angles uniform in [0, 2π).
     * This spreads candidates broadly over SO(3) but is not the uniform distribution on it.
     */
    pub fn random_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> RigidTransform {
        let two_pi = 2.0*float::consts::PI;
        let t = Vector3::<Float>::new(
            gaussian(rng, 0.0, self.initial_translation_sigma),
            gaussian(rng, 0.0, self.initial_translation_sigma),
            gaussian(rng, 0.0, self.initial_translation_sigma));
        let rot_x = UnitQuaternion::<Float>::from_axis_angle(&Vector3::x_axis(), rng.gen::<Float>()*two_pi);
        let rot_y = UnitQuaternion::<Float>::from_axis_angle(&Vector3::y_axis(), rng.gen::<Float>()*two_pi);
        let rot_z = UnitQuaternion::<Float>::from_axis_angle(&Vector3::z_axis(), rng.gen::<Float>()*two_pi);
        from_parts(&t, &(rot_x*rot_y*rot_z))
    }

    pub fn random_population<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<RigidTransform> {
        (0..size).map(|_| self.random_candidate(rng)).collect::<Vec<RigidTransform>>()
    }

    /**
     * Returns a perturbed copy. floor(|N(0,1)| + 1) single axis perturbations are applied, usually one or two.
     */
    pub fn mutate<R: Rng + ?Sized>(&self, candidate: &RigidTransform, amount: Float, rng: &mut R) -> RigidTransform {
        let count = (gaussian(rng, 0.0, 1.0).abs() + 1.0) as usize;
        (0..count).fold(*candidate, |acc, _| {
            let kind = MutationKind::sample(rng);
            self.perturb(&acc, kind, amount, rng)
        })
    }

    pub fn perturb<R: Rng + ?Sized>(&self, candidate: &RigidTransform, kind: MutationKind, amount: Float, rng: &mut R) -> RigidTransform {
        let mut t = candidate.translation.vector;
        let mut rot = candidate.rotation;
        match kind {
            MutationKind::TranslateX | MutationKind::TranslateY | MutationKind::TranslateZ => {
                t += kind.axis().into_inner()*gaussian(rng, 0.0, self.mutation_translation_sigma)*amount;
            },
            MutationKind::RotateX | MutationKind::RotateY | MutationKind::RotateZ => {
                let angle = gaussian(rng, 0.0, self.mutation_rotation_sigma)*amount;
                rot = renormalize(&(rot*UnitQuaternion::<Float>::from_axis_angle(&kind.axis(), angle)));
            }
        };
        from_parts(&t, &rot)
    }
}
