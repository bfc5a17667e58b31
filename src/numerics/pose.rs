extern crate nalgebra as na;

use na::{Vector3, Quaternion, UnitQuaternion, Isometry3, Translation3};
use crate::Float;

/**
 * Translation + unit quaternion. Used both for calibration candidates and for observed relative motions.
 */
pub type RigidTransform = Isometry3<Float>;

pub fn from_parts(t: &Vector3<Float>, quat: &UnitQuaternion<Float>) -> RigidTransform {
    Isometry3::<Float>::from_parts(Translation3::from(*t), renormalize(quat))
}

/**
 * Builds a transform from raw quaternion components in x,y,z,w order. The quaternion is normalized.
 */
pub fn from_components(t: &Vector3<Float>, q_x: Float, q_y: Float, q_z: Float, q_w: Float) -> RigidTransform {
    let quat = UnitQuaternion::<Float>::from_quaternion(Quaternion::<Float>::new(q_w, q_x, q_y, q_z));
    Isometry3::<Float>::from_parts(Translation3::from(*t), quat)
}

pub fn renormalize(quat: &UnitQuaternion<Float>) -> UnitQuaternion<Float> {
    UnitQuaternion::<Float>::new_normalize(*quat.quaternion())
}

/**
 * Applies b then a: rotates b's translation by a's rotation and adds a's translation.
 */
pub fn compose(a: &RigidTransform, b: &RigidTransform) -> RigidTransform {
    let translation = a.rotation * b.translation.vector + a.translation.vector;
    let rotation = renormalize(&(a.rotation * b.rotation));
    Isometry3::<Float>::from_parts(Translation3::from(translation), rotation)
}

pub fn invert(a: &RigidTransform) -> RigidTransform {
    let rotation = a.rotation.inverse();
    let translation = -(rotation * a.translation.vector);
    Isometry3::<Float>::from_parts(Translation3::from(translation), rotation)
}

/**
 * invert(frame) ∘ motion ∘ frame: re-expresses a motion given in one frame in the frame that `frame` maps from.
 */
pub fn conjugate(frame: &RigidTransform, motion: &RigidTransform) -> RigidTransform {
    compose(&compose(&invert(frame), motion), frame)
}

pub fn translation_distance(a: &RigidTransform, b: &RigidTransform) -> Float {
    (a.translation.vector - b.translation.vector).norm()
}

/**
 * Geodesic distance on SO(3) in [0, π]. q and -q are the same rotation so the absolute dot product is used.
 */
pub fn angular_distance(a: &RigidTransform, b: &RigidTransform) -> Float {
    rotation_angle_between(&a.rotation, &b.rotation)
}

pub fn rotation_angle_between(a: &UnitQuaternion<Float>, b: &UnitQuaternion<Float>) -> Float {
    let dot = a.coords.dot(&b.coords).abs().min(1.0);
    2.0*dot.acos()
}

pub fn identity() -> RigidTransform {
    RigidTransform::identity()
}
