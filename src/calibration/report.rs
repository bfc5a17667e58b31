use serde::{Deserialize, Serialize};
use crate::Float;
use crate::numerics::pose::RigidTransform;
use super::CalibrationResult;

/**
 * "tx ty tz qx qy qz qw", the argument order of a static transform publisher
 */
pub fn static_transform_args(transform: &RigidTransform) -> String {
    let t = &transform.translation.vector;
    let q = &transform.rotation;
    format!("{} {} {} {} {} {} {}", t[0], t[1], t[2], q.i, q.j, q.k, q.w)
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct StaticTransformFrames {
    pub parent: String,
    pub child: String,
    pub period_ms: u32
}

impl Default for StaticTransformFrames {
    fn default() -> StaticTransformFrames {
        StaticTransformFrames {
            parent: String::from("/base_link"),
            child: String::from("/kinect"),
            period_ms: 100
        }
    }
}

impl StaticTransformFrames {

    pub fn launch_snippet(&self, transform: &RigidTransform) -> String {
        format!("<node pkg=\"tf\" type=\"static_transform_publisher\" name=\"{}_to_{}\" args=\"{} {} {} {}\"/>",
            frame_name(&self.parent), frame_name(&self.child),
            static_transform_args(transform), self.parent, self.child, self.period_ms)
    }

    pub fn rosrun_command(&self, transform: &RigidTransform) -> String {
        format!("rosrun tf static_transform_publisher {} {} {} {}", static_transform_args(transform), self.parent, self.child, self.period_ms)
    }
}

fn frame_name(frame: &str) -> &str {
    frame.trim_start_matches('/')
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CalibrationReport {
    pub translation: [Float; 3],
    /// x, y, z, w
    pub rotation: [Float; 4],
    pub score: Float,
    pub generations_run: usize,
    pub observation_count: usize,
    pub aborted: bool,
    pub history: Vec<Float>
}

impl CalibrationReport {

    pub fn from_result(result: &CalibrationResult) -> CalibrationReport {
        let t = &result.transform.translation.vector;
        let q = &result.transform.rotation;
        CalibrationReport {
            translation: [t[0], t[1], t[2]],
            rotation: [q.i, q.j, q.k, q.w],
            score: result.score,
            generations_run: result.generations_run,
            observation_count: result.observation_count,
            aborted: result.aborted,
            history: result.history.clone()
        }
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}
