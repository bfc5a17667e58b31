extern crate nalgebra as na;

use approx::assert_relative_eq;
use na::{Vector3, UnitQuaternion};
use rand::{SeedableRng, rngs::SmallRng};
use extrinsic_calibration::{Float, float};
use extrinsic_calibration::numerics::pose::{from_parts, angular_distance, translation_distance};
use extrinsic_calibration::calibration::candidate::{CandidateGenerator, MutationKind};

#[test]
fn test_random_candidates_are_seed_reproducible() {
    let generator = CandidateGenerator::default();
    let a = generator.random_population(64, &mut SmallRng::seed_from_u64(42));
    let b = generator.random_population(64, &mut SmallRng::seed_from_u64(42));
    let c = generator.random_population(64, &mut SmallRng::seed_from_u64(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_random_candidate_translation_spread() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(7);
    let candidates = generator.random_population(4000, &mut rng);
    let values = candidates.iter().flat_map(|c| c.translation.vector.iter().cloned().collect::<Vec<Float>>()).collect::<Vec<Float>>();
    let n = values.len() as Float;
    let mean = values.iter().sum::<Float>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<Float>() / n).sqrt();

    assert!(mean.abs() < 0.03);
    assert!(std > 0.45 && std < 0.55);
    for candidate in &candidates {
        assert_relative_eq!(candidate.rotation.quaternion().norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_random_candidate_rotations_cover_large_angles() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(8);
    let candidates = generator.random_population(1000, &mut rng);
    let large = candidates.iter().filter(|c| c.rotation.angle() > float::consts::FRAC_PI_2).count();
    assert!(large > 300);
}

#[test]
fn test_mutate_is_pure_and_keeps_unit_rotation() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(9);
    let candidate = generator.random_candidate(&mut rng);
    let copy = candidate;
    for _ in 0..500 {
        let mutated = generator.mutate(&candidate, 2.0, &mut rng);
        assert_relative_eq!(mutated.rotation.quaternion().norm(), 1.0, epsilon = 1e-12);
    }
    assert_eq!(candidate, copy);
}

#[test]
fn test_mutate_without_annealing_is_identity() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(10);
    let candidate = generator.random_candidate(&mut rng);
    for _ in 0..100 {
        let mutated = generator.mutate(&candidate, 0.0, &mut rng);
        assert!(translation_distance(&candidate, &mutated) < 1e-12);
        assert!(angular_distance(&candidate, &mutated) < 1e-6);
    }
}

#[test]
fn test_mutation_magnitude_scales_with_annealing() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(11);
    let candidate = generator.random_candidate(&mut rng);
    let mean_change = |amount: Float, rng: &mut SmallRng| {
        (0..2000).map(|_| {
            let mutated = generator.mutate(&candidate, amount, rng);
            translation_distance(&candidate, &mutated) + angular_distance(&candidate, &mutated)
        }).sum::<Float>() / 2000.0
    };
    let small = mean_change(0.1, &mut rng);
    let large = mean_change(2.0, &mut rng);
    assert!(small > 0.0);
    assert!(large > 10.0*small);
}

#[test]
fn test_perturb_translation_changes_single_axis() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(12);
    let candidate = from_parts(&Vector3::new(1.0, 2.0, 3.0), &UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.4));

    let mutated = generator.perturb(&candidate, MutationKind::TranslateY, 1.0, &mut rng);
    assert_eq!(mutated.translation.vector[0], 1.0);
    assert_ne!(mutated.translation.vector[1], 2.0);
    assert_eq!(mutated.translation.vector[2], 3.0);
    assert!(angular_distance(&candidate, &mutated) < 1e-6);
}

#[test]
fn test_perturb_rotation_rotates_about_body_axis() {
    let generator = CandidateGenerator::default();
    let mut rng = SmallRng::seed_from_u64(13);
    let candidate = from_parts(&Vector3::new(1.0, 2.0, 3.0), &UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.4));

    let mutated = generator.perturb(&candidate, MutationKind::RotateZ, 1.0, &mut rng);
    assert_eq!(mutated.translation.vector, candidate.translation.vector);

    let delta = candidate.rotation.inverse()*mutated.rotation;
    assert_relative_eq!(delta.angle(), angular_distance(&candidate, &mutated), epsilon = 1e-6);
    match delta.axis() {
        Some(axis) => assert_relative_eq!(axis.into_inner()[2].abs(), 1.0, epsilon = 1e-6),
        None => assert!(delta.angle() < 1e-9)
    }
}

#[test]
fn test_mutation_kinds_are_uniformly_sampled() {
    let mut rng = SmallRng::seed_from_u64(14);
    let mut counts = [0usize; 6];
    for _ in 0..6000 {
        let kind = MutationKind::sample(&mut rng);
        let idx = MutationKind::ALL.iter().position(|k| *k == kind).unwrap();
        counts[idx] += 1;
    }
    for count in counts.iter() {
        assert!(*count > 850 && *count < 1150);
    }
}
