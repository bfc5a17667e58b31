use crate::Float;
use crate::numerics::pose::{RigidTransform, conjugate, translation_distance, angular_distance};
use super::observation::RelativePoseObservation;

/**
 * Scores a calibration candidate X = T_odom<-reg against observed motion pairs.
 * An odometry motion A predicts the registration motion X^-1 * A * X.
 * The discrepancy is the translation distance (m) plus rotation_weight times the angular distance (rad).
 */
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ErrorModel {
    pub rotation_weight: Float
}

impl Default for ErrorModel {
    fn default() -> ErrorModel {
        ErrorModel { rotation_weight: 1.0 }
    }
}

impl ErrorModel {

    pub fn new(rotation_weight: Float) -> ErrorModel {
        ErrorModel { rotation_weight }
    }

    pub fn predict_registration(candidate: &RigidTransform, observation: &RelativePoseObservation) -> RigidTransform {
        conjugate(candidate, &observation.odometry)
    }

    pub fn score(&self, candidate: &RigidTransform, observation: &RelativePoseObservation) -> Float {
        let predicted = ErrorModel::predict_registration(candidate, observation);
        let e_tr = translation_distance(&predicted, &observation.registration);
        let e_rot = angular_distance(&predicted, &observation.registration);
        e_tr + self.rotation_weight*e_rot
    }

    /**
     * Unnormalized sum over all observations. An empty set scores 0 for every candidate.
     */
    pub fn aggregate_score(&self, candidate: &RigidTransform, observations: &[RelativePoseObservation]) -> Float {
        observations.iter().fold(0.0, |acc, observation| acc + self.score(candidate, observation))
    }
}
