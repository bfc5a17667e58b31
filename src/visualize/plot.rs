extern crate plotters;

use plotters::prelude::*;

use crate::{float,Float};

fn get_min_max(data: &[Float]) -> (Float,Float) {
    let (mut min, mut max) = data.iter().filter(|v| v.is_finite()).fold((float::MAX, float::MIN), |(min, max), &v| (min.min(v), max.max(v)));

    if min > max {
        min = 0.0;
        max = 0.0;
    }

    if(max-min) < 1e-5 {
        max = min + 1e-5;
    }

    (min,max)
}

/**
 * Line graph of the best aggregate error of each generation.
 */
pub fn draw_convergence(history: &[Float], output_folder: &str, file_name: &str, info: &str) -> Result<(), Box<dyn std::error::Error>> {
    if history.is_empty() {
        return Err("no generations to plot".into());
    }
    let (min,max) = get_min_max(history);
    let last_generation = std::cmp::max(history.len() - 1, 1);

    let path = format!("{}/{}",output_folder,file_name);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .caption(info, ("sans-serif", 20))
        .build_cartesian_2d(0..last_generation, min..max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("generation")
        .y_desc("best error")
        .draw()?;

    chart.draw_series(
        LineSeries::new(
            (0..).zip(history.iter()).map(|(x, y)| (x, *y)),
            &RED,
        )
    )?;

    root.present()?;

    Ok(())
}
