extern crate nalgebra as na;

use na::{Vector3, UnitQuaternion};
use crate::Float;
use crate::numerics::pose::{RigidTransform, from_parts};

/**
 * One training row: the displacement measured by the registration sensor (e.g. ICP) and by odometry over the same interval.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct RelativePoseObservation {
    pub timestamp: Float,
    pub registration: RigidTransform,
    pub odometry: RigidTransform
}

impl RelativePoseObservation {

    pub fn new(timestamp: Float, registration: RigidTransform, odometry: RigidTransform) -> RelativePoseObservation {
        RelativePoseObservation {
            timestamp,
            registration: from_parts(&registration.translation.vector, &registration.rotation),
            odometry: from_parts(&odometry.translation.vector, &odometry.rotation)
        }
    }

    pub fn from_parts(timestamp: Float,
                      registration_translation: &Vector3<Float>, registration_rotation: &UnitQuaternion<Float>,
                      odometry_translation: &Vector3<Float>, odometry_rotation: &UnitQuaternion<Float>) -> RelativePoseObservation {
        RelativePoseObservation {
            timestamp,
            registration: from_parts(registration_translation, registration_rotation),
            odometry: from_parts(odometry_translation, odometry_rotation)
        }
    }

    pub fn registration_translation(&self) -> &Vector3<Float> {
        &self.registration.translation.vector
    }

    pub fn registration_rotation(&self) -> &UnitQuaternion<Float> {
        &self.registration.rotation
    }

    pub fn odometry_translation(&self) -> &Vector3<Float> {
        &self.odometry.translation.vector
    }

    pub fn odometry_rotation(&self) -> &UnitQuaternion<Float> {
        &self.odometry.rotation
    }

    /**
     * Same 15 value layout as the log: t, registration t q(x,y,z,w), odometry t q(x,y,z,w)
     */
    pub fn to_record(&self) -> String {
        let r_t = self.registration_translation();
        let r_q = self.registration_rotation();
        let o_t = self.odometry_translation();
        let o_q = self.odometry_rotation();
        format!("{} {} {} {} {} {} {} {} {} {} {} {} {} {} {}",
            self.timestamp,
            r_t[0], r_t[1], r_t[2], r_q.i, r_q.j, r_q.k, r_q.w,
            o_t[0], o_t[1], o_t[2], o_q.i, o_q.j, o_q.k, o_q.w)
    }
}
