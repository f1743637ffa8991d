//! Charts for pipeline runs and HRT sweeps.

use anyhow::Result;
use aquaview_core::{
    analysis::{read_stage_log, SweepPoint},
    constants::RAW_WATER,
    logger::StageLogEntry,
};
use aquaview_schemas::{stage::ProcessStage, water_quality::Metric};
use plotters::prelude::*;

/// One x position on the stage profile: raw water followed by each stage's effluent.
#[derive(Clone, Debug)]
struct ProfilePoint {
    step: usize,
    bod: f64,
    tss: f64,
    cod: f64,
    ammonia: f64,
    turbidity: f64,
    ph: f64,
    do_level: f64,
}

impl From<&StageLogEntry> for ProfilePoint {
    fn from(e: &StageLogEntry) -> Self {
        Self {
            step: e.step,
            bod: e.bod,
            tss: e.tss,
            cod: e.cod,
            ammonia: e.ammonia,
            turbidity: e.turbidity,
            ph: e.ph,
            do_level: e.do_level,
        }
    }
}

/// Generates every chart for a single run from its stage log.
pub fn generate_run_plots(output_dir: &str, log_path: &str) -> Result<()> {
    println!("[Plotting] Generating graphs from stage log...");

    let entries = read_stage_log(log_path)?;
    if entries.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    let mut data = vec![ProfilePoint {
        step: 0,
        bod: RAW_WATER.bod,
        tss: RAW_WATER.tss,
        cod: RAW_WATER.cod,
        ammonia: RAW_WATER.ammonia,
        turbidity: RAW_WATER.turbidity,
        ph: RAW_WATER.ph,
        do_level: RAW_WATER.do_level,
    }];
    data.extend(entries.iter().map(ProfilePoint::from));

    plot_stage_profile(output_dir, &data)?;
    plot_ph_and_oxygen(output_dir, &data)?;

    println!("[Plotting] Run graphs have been saved to '{}'.", output_dir);
    Ok(())
}

fn step_label(step: usize) -> String {
    match step {
        0 => "Raw".to_string(),
        n => ProcessStage::ORDER
            .get(n - 1)
            .map(|s| s.label().split(' ').next().unwrap_or_default().to_string())
            .unwrap_or_default(),
    }
}

fn plot_stage_profile(output_dir: &str, data: &[ProfilePoint]) -> Result<()> {
    let path = format!("{}/stage_profile.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = data
        .iter()
        .flat_map(|p| [p.bod, p.tss, p.cod, p.ammonia, p.turbidity])
        .fold(0.0f64, f64::max);
    let last_step = data.last().map_or(0, |p| p.step);

    let mut chart = ChartBuilder::on(&root)
        .caption("Water Quality Through the Treatment Train", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..last_step, 0.0..max_y * 1.1)?;

    chart
        .configure_mesh()
        .x_labels(last_step + 1)
        .x_label_formatter(&|step| step_label(*step))
        .x_desc("Stage")
        .y_desc("Concentration (mg/L, turbidity NTU)")
        .draw()?;

    let series: [(Metric, fn(&ProfilePoint) -> f64); 5] = [
        (Metric::Bod, |p| p.bod),
        (Metric::Tss, |p| p.tss),
        (Metric::Cod, |p| p.cod),
        (Metric::Ammonia, |p| p.ammonia),
        (Metric::Turbidity, |p| p.turbidity),
    ];

    for (i, (metric, value)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                data.iter().map(|p| (p.step, value(p))),
                color.stroke_width(2),
            ))?
            .label(metric.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("[Plotting] Stage profile chart saved to {}", path);
    Ok(())
}

fn plot_ph_and_oxygen(output_dir: &str, data: &[ProfilePoint]) -> Result<()> {
    let path = format!("{}/ph_and_oxygen.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let last_step = data.last().map_or(0, |p| p.step);

    let mut chart = ChartBuilder::on(&root)
        .caption("pH and Dissolved Oxygen", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0usize..last_step, 0.0..10.0)?;

    chart
        .configure_mesh()
        .x_labels(last_step + 1)
        .x_label_formatter(&|step| step_label(*step))
        .x_desc("Stage")
        .y_desc("pH / DO (mg/L)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(data.iter().map(|p| (p.step, p.ph)), RED.stroke_width(2)))?
        .label("pH")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));

    chart
        .draw_series(LineSeries::new(data.iter().map(|p| (p.step, p.do_level)), BLUE.stroke_width(2)))?
        .label("Dissolved Oxygen")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("[Plotting] pH and oxygen chart saved to {}", path);
    Ok(())
}

/// Plots the swept stage's effluent BOD, TSS and ammonia against HRT ratio.
pub fn plot_sweep(output_dir: &str, stage: ProcessStage, points: &[SweepPoint]) -> Result<()> {
    if points.is_empty() {
        println!("[Plotting] Warning: No sweep points to plot.");
        return Ok(());
    }

    let path = format!("{}/sweep_{}.png", output_dir, stage);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let min_x = points.first().map_or(0.0, |p| p.hrt_ratio);
    let max_x = points.last().map_or(1.0, |p| p.hrt_ratio);
    let max_y = points
        .iter()
        .flat_map(|p| [p.stage_effluent.bod, p.stage_effluent.tss, p.stage_effluent.ammonia])
        .fold(0.0f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} HRT Sweep", stage.label()), ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min_x..max_x, 0.0..max_y * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("HRT ratio (x design)")
        .y_desc("Stage effluent (mg/L)")
        .draw()?;

    let series: [(Metric, RGBColor); 3] = [(Metric::Bod, RED), (Metric::Tss, GREEN), (Metric::Ammonia, BLUE)];
    for (metric, color) in series {
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.hrt_ratio, p.stage_effluent.get(metric))),
                color.stroke_width(2),
            ))?
            .label(metric.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
        chart.draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.hrt_ratio, p.stage_effluent.get(metric)), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("[Plotting] Sweep chart saved to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_labels_name_raw_water_and_stages() {
        assert_eq!(step_label(0), "Raw");
        assert_eq!(step_label(1), "Primary");
        assert_eq!(step_label(4), "Nitrification");
        assert_eq!(step_label(9), "");
    }
}
