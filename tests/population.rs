extern crate nalgebra as na;

use na::{Vector3, UnitQuaternion};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use extrinsic_calibration::Float;
use extrinsic_calibration::numerics::pose::{RigidTransform, from_parts, conjugate};
use extrinsic_calibration::calibration::observation::RelativePoseObservation;
use extrinsic_calibration::calibration::candidate::CandidateGenerator;
use extrinsic_calibration::calibration::error_model::ErrorModel;
use extrinsic_calibration::calibration::population::{Population, SLOTS_PER_SURVIVOR};

fn observations(rng: &mut SmallRng, count: usize) -> Vec<RelativePoseObservation> {
    let calibration = from_parts(&Vector3::new(0.1, -0.05, 0.2), &UnitQuaternion::from_euler_angles(0.1, 0.2, 1.3));
    (0..count).map(|i| {
        let t = Vector3::<Float>::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2));
        let odometry = from_parts(&t, &UnitQuaternion::from_euler_angles(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)));
        RelativePoseObservation::new(i as Float, conjugate(&calibration, &odometry), odometry)
    }).collect::<Vec<RelativePoseObservation>>()
}

fn random_population(size: usize, rng: &mut SmallRng) -> Population {
    Population::random(size, CandidateGenerator::default(), ErrorModel::default(), rng).unwrap()
}

#[test]
fn test_population_size_must_be_multiple_of_four() {
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(Population::random(3, CandidateGenerator::default(), ErrorModel::default(), &mut rng).is_err());
    assert!(Population::random(0, CandidateGenerator::default(), ErrorModel::default(), &mut rng).is_err());
    assert!(Population::random(10, CandidateGenerator::default(), ErrorModel::default(), &mut rng).is_err());
    assert!(Population::new(vec![RigidTransform::identity(); 6], CandidateGenerator::default(), ErrorModel::default()).is_err());

    let population = random_population(8, &mut rng);
    assert_eq!(population.len(), 8);
    assert_eq!(population.survivor_count(), 2);
}

#[test]
fn test_rank_is_stable_for_ties() {
    let scores = [3.0, 1.0, 2.0, 1.0, 0.5, 2.0];
    assert_eq!(Population::rank(&scores), vec![4, 1, 3, 2, 5, 0]);
}

#[test]
fn test_rank_puts_nan_last() {
    let scores = [Float::NAN, 1.0, 0.0];
    assert_eq!(Population::rank(&scores), vec![2, 1, 0]);
}

#[test]
fn test_parallel_and_sequential_evaluation_agree() {
    let mut rng = SmallRng::seed_from_u64(1);
    let observations = observations(&mut rng, 20);
    let population = random_population(64, &mut rng);
    let parallel = population.clone().with_parallel(true).evaluate(&observations);
    let sequential = population.with_parallel(false).evaluate(&observations);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_generation_reports_best_before_reproduction() {
    let mut rng = SmallRng::seed_from_u64(2);
    let observations = observations(&mut rng, 10);
    let mut population = random_population(32, &mut rng);
    let before = population.candidates().to_vec();
    let scores = population.evaluate(&observations);

    let result = population.run_generation(&observations, 1.0, &mut rng);

    let min_score = scores.iter().cloned().fold(Float::INFINITY, Float::min);
    assert_eq!(result.best_score, min_score);
    assert_eq!(result.best, before[result.best_index]);
    assert_eq!(scores[result.best_index], min_score);
    assert_eq!(population.candidates()[0], result.best);
}

#[test]
fn test_truncation_and_reproduction_shape() {
    let mut rng = SmallRng::seed_from_u64(3);
    let observations = observations(&mut rng, 10);
    let mut population = random_population(64, &mut rng);
    let before = population.candidates().to_vec();
    let ranking = Population::rank(&population.evaluate(&observations));

    population.run_generation(&observations, 1.0, &mut rng);
    let after = population.candidates();

    assert_eq!(after.len(), before.len());
    for (rank, &survivor_index) in ranking.iter().take(before.len() / SLOTS_PER_SURVIVOR).enumerate() {
        let slots = &after[rank*SLOTS_PER_SURVIVOR..(rank+1)*SLOTS_PER_SURVIVOR];
        assert_eq!(slots[0], before[survivor_index]);
        for mutated in &slots[1..] {
            assert_ne!(*mutated, before[survivor_index]);
        }
    }
}

#[test]
fn test_empty_observations_keep_population_order() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut population = random_population(16, &mut rng);
    let before = population.candidates().to_vec();

    assert!(population.evaluate(&[]).iter().all(|&s| s == 0.0));
    let result = population.run_generation(&[], 1.0, &mut rng);

    assert_eq!(result.best_score, 0.0);
    assert_eq!(result.best_index, 0);
    assert_eq!(result.best, before[0]);
    for survivor in 0..4 {
        assert_eq!(population.candidates()[survivor*SLOTS_PER_SURVIVOR], before[survivor]);
    }
}

#[test]
fn test_best_score_is_non_increasing() {
    let mut rng = SmallRng::seed_from_u64(5);
    let observations = observations(&mut rng, 8);
    let mut population = random_population(128, &mut rng);

    let mut previous = Float::INFINITY;
    for generation in 0..30 {
        let annealing = 2.0*(30 - generation) as Float / 30.0;
        let result = population.run_generation(&observations, annealing, &mut rng);
        assert!(result.best_score <= previous);
        assert!(result.mean_score >= result.best_score);
        previous = result.best_score;
    }
}

#[test]
fn test_generations_are_seed_reproducible() {
    let run = |seed: u64| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let observations = observations(&mut rng, 5);
        let mut population = random_population(32, &mut rng);
        let results = (0..5).map(|_| population.run_generation(&observations, 1.0, &mut rng).best_score).collect::<Vec<Float>>();
        (results, population.candidates().to_vec())
    };
    assert_eq!(run(6), run(6));
}
