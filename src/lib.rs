
use std::path::Path;
use std::fs::File;
use std::io::BufReader;
use color_eyre::eyre::{Result, WrapErr};

use self::calibration::runtime_parameters::CalibrationRuntimeParameters;

pub mod numerics;
pub mod calibration;
pub mod io;
pub mod visualize;

pub use self::calibration::{calibrate, calibrate_with_abort, CalibrationResult};
pub use self::calibration::observation::RelativePoseObservation;
pub use self::numerics::pose::RigidTransform;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

/**
 * Reads run parameters from YAML. Missing keys take their defaults. The result is validated.
 */
pub fn load_runtime_parameters(file_path: &Path) -> Result<CalibrationRuntimeParameters> {
    let file = File::open(file_path).wrap_err_with(|| format!("opening runtime parameters {} failed", file_path.display()))?;
    let runtime_parameters: CalibrationRuntimeParameters = serde_yaml::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("parsing runtime parameters {} failed", file_path.display()))?;
    runtime_parameters.validate()?;
    Ok(runtime_parameters)
}
