extern crate nalgebra as na;

use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use na::Vector3;
use log::{info, warn};
use color_eyre::eyre::{Result, WrapErr, ensure, eyre};

use crate::Float;
use crate::calibration::observation::RelativePoseObservation;
use crate::numerics::pose::{RigidTransform, from_components};

/// t, registration (tx ty tz qx qy qz qw), odometry (tx ty tz qx qy qz qw)
pub const VALUES_PER_RECORD: usize = 15;

const MIN_QUATERNION_NORM: Float = 1e-12;

fn parse_to_float(token: &str) -> Result<Float> {
    token.parse::<Float>().map_err(|e| eyre!("cannot parse '{}' as a number: {}", token, e))
}

fn transform_from_values(values: &[Float], record_index: usize) -> Result<RigidTransform> {
    let quaternion_norm = values[3..7].iter().map(|v| v*v).sum::<Float>().sqrt();
    ensure!(quaternion_norm > MIN_QUATERNION_NORM, "record {}: quaternion has zero norm", record_index);
    Ok(from_components(&Vector3::<Float>::new(values[0], values[1], values[2]), values[3], values[4], values[5], values[6]))
}

pub fn observation_from_values(values: &[Float], record_index: usize) -> Result<RelativePoseObservation> {
    ensure!(values.len() == VALUES_PER_RECORD, "record {}: expected {} values, got {}", record_index, VALUES_PER_RECORD, values.len());
    let registration = transform_from_values(&values[1..8], record_index)?;
    let odometry = transform_from_values(&values[8..15], record_index)?;
    Ok(RelativePoseObservation::new(values[0], registration, odometry))
}

/**
 * Whitespace separated values, line breaks are not significant.
 * Reading stops at the first non-numeric token; it and any incomplete record before it are dropped.
 * A complete record with a zero quaternion is skipped.
 */
pub fn parse_observations<B: BufRead>(reader: B) -> Result<Vec<RelativePoseObservation>> {
    let mut observations = Vec::<RelativePoseObservation>::new();
    let mut values = Vec::<Float>::with_capacity(VALUES_PER_RECORD);
    let mut record_index = 0;

    'lines: for line in reader.lines() {
        let contents = line.wrap_err("reading observation log failed")?;
        for token in contents.split_whitespace() {
            match parse_to_float(token).wrap_err_with(|| format!("record {}", record_index)) {
                Ok(value) => values.push(value),
                Err(e) => {
                    warn!("Stopped reading observations: {:#}", e);
                    values.clear();
                    break 'lines;
                }
            };
            if values.len() == VALUES_PER_RECORD {
                match observation_from_values(&values, record_index) {
                    Ok(observation) => observations.push(observation),
                    Err(e) => warn!("Discarding record: {}", e)
                };
                record_index += 1;
                values.clear();
            }
        }
    }

    if !values.is_empty() {
        warn!("Discarding incomplete trailing record with {} of {} values", values.len(), VALUES_PER_RECORD);
    }

    Ok(observations)
}

pub fn load_observations(file_path: &Path) -> Result<Vec<RelativePoseObservation>> {
    let file = File::open(file_path).wrap_err_with(|| format!("opening observation log {} failed", file_path.display()))?;
    let observations = parse_observations(BufReader::new(file)).wrap_err_with(|| format!("parsing observation log {} failed", file_path.display()))?;
    info!("Loaded {} training entries", observations.len());
    Ok(observations)
}
