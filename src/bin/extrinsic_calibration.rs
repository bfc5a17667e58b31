extern crate rand;

use std::path::{Path, PathBuf};
use std::fs;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use rand::{SeedableRng, rngs::SmallRng};

use extrinsic_calibration::{calibrate, load_runtime_parameters};
use extrinsic_calibration::io::load_observations;
use extrinsic_calibration::calibration::runtime_parameters::CalibrationRuntimeParameters;
use extrinsic_calibration::calibration::report::{CalibrationReport, StaticTransformFrames};
use extrinsic_calibration::visualize::plot::draw_convergence;

const USAGE: &str = "Usage: extrinsic_calibration LOG_FILE_NAME [PARAMS_YAML] [--report-yaml FILE] [--plot FILE.png] [--parent FRAME] [--child FRAME]";

#[derive(Debug, Default)]
struct Arguments {
    log_file: PathBuf,
    parameters_file: Option<PathBuf>,
    report_file: Option<PathBuf>,
    plot_file: Option<PathBuf>,
    frames: StaticTransformFrames
}

fn parse_arguments(args: &[String]) -> Result<Arguments> {
    let mut arguments = Arguments::default();
    let mut positional = Vec::<&String>::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| eyre!("{} needs a value\n{}", arg, USAGE));
        match arg.as_str() {
            "--report-yaml" => arguments.report_file = Some(PathBuf::from(value()?)),
            "--plot" => arguments.plot_file = Some(PathBuf::from(value()?)),
            "--parent" => arguments.frames.parent = value()?.clone(),
            "--child" => arguments.frames.child = value()?.clone(),
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            _ => positional.push(arg)
        }
    }

    match positional.as_slice() {
        [log_file] => arguments.log_file = PathBuf::from(log_file),
        [log_file, parameters_file] => {
            arguments.log_file = PathBuf::from(log_file);
            arguments.parameters_file = Some(PathBuf::from(parameters_file));
        },
        _ => bail!("{}", USAGE)
    };

    Ok(arguments)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let arguments = parse_arguments(&args)?;

    let runtime_parameters = match &arguments.parameters_file {
        Some(path) => load_runtime_parameters(path)?,
        None => CalibrationRuntimeParameters::default()
    };
    let observations = load_observations(&arguments.log_file)?;

    let mut rng = match runtime_parameters.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy()
    };

    let result = calibrate(&observations, &runtime_parameters, &mut rng)?;

    println!("\nOptimization completed with error {}, code to COPY-PASTE in to use the transformation:\n", result.score);
    println!("{}\n\n OR \n\n{}\n", arguments.frames.launch_snippet(&result.transform), arguments.frames.rosrun_command(&result.transform));

    if let Some(report_file) = &arguments.report_file {
        let yaml = CalibrationReport::from_result(&result).to_yaml()?;
        fs::write(report_file, yaml).wrap_err_with(|| format!("writing report {} failed", report_file.display()))?;
    }

    if let Some(plot_file) = &arguments.plot_file {
        let folder = plot_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        let file_name = plot_file.file_name().ok_or_else(|| eyre!("invalid plot file {}", plot_file.display()))?;
        draw_convergence(&result.history, &folder.to_string_lossy(), &file_name.to_string_lossy(), &runtime_parameters.to_string())
            .map_err(|e| eyre!("drawing convergence plot failed: {}", e))?;
    }

    Ok(())
}
