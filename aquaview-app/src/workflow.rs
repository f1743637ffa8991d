use crate::plotting;
use anyhow::{Context, Result};
use aquaview_core::{
    analysis::{self, ratio_band, SweepPoint},
    logger::StageLogger,
    scenario,
    status::compliance_breakdown,
    AquaviewError, PipelineBuilder,
};
use aquaview_schemas::{
    file_formats::ScenarioFile,
    pipeline::PipelineResult,
    stage::{ProcessStage, StageParamsRequest},
    status::Status,
    water_quality::Metric,
};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path};

/// Flat CSV row for one sweep point.
#[derive(Debug, Serialize)]
struct SweepRow {
    hrt_ratio: f64,
    hrt_hours: f64,
    stage_bod: f64,
    stage_tss: f64,
    stage_cod: f64,
    stage_ammonia: f64,
    stage_turbidity: f64,
    stage_coliform: f64,
    stage_status: Status,
    treated_bod: f64,
    treated_ammonia: f64,
    treated_coliform: f64,
    overall_status: Status,
}

impl From<&SweepPoint> for SweepRow {
    fn from(p: &SweepPoint) -> Self {
        Self {
            hrt_ratio: p.hrt_ratio,
            hrt_hours: p.hrt_hours,
            stage_bod: p.stage_effluent.bod,
            stage_tss: p.stage_effluent.tss,
            stage_cod: p.stage_effluent.cod,
            stage_ammonia: p.stage_effluent.ammonia,
            stage_turbidity: p.stage_effluent.turbidity,
            stage_coliform: p.stage_effluent.coliform,
            stage_status: p.stage_status,
            treated_bod: p.treated_water.bod,
            treated_ammonia: p.treated_water.ammonia,
            treated_coliform: p.treated_water.coliform,
            overall_status: p.overall_status,
        }
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("Output path is not valid UTF-8: {:?}", path))
}

/// Validates the requests, runs the pipeline and writes the stage log, the
/// JSON result and the charts into `output_dir`.
pub fn run_scenario(name: &str, requests: &[StageParamsRequest], output_dir: &Path) -> Result<PipelineResult> {
    println!("\n--- [Workflow] Running Scenario '{}' ---", name);

    let engine = PipelineBuilder::new()
        .with_requests(requests)
        .build()
        .with_context(|| format!("Invalid parameters in scenario '{}'", name))?;
    let result = engine.run();
    log::info!("Scenario '{}' finished with overall status {}", name, result.overall_status);

    let log_path = output_dir.join("stages.csv");
    let log_path = path_str(&log_path)?;
    let mut logger = StageLogger::new(log_path)
        .with_context(|| format!("Failed to create stage log {}", log_path))?;
    logger
        .log_result(name, &result)
        .with_context(|| format!("Failed to write stage log {}", log_path))?;

    let json_path = output_dir.join("result.json");
    scenario::write_result_json(path_str(&json_path)?, &result)?;

    // chart failures are not fatal
    if let Err(e) = plotting::generate_run_plots(path_str(output_dir)?, log_path) {
        log::warn!("Could not render stage charts: {:#}", e);
    }

    print_summary_report(name, &result);
    Ok(result)
}

/// Sweeps one stage and writes `sweep_<stage>.csv` and its chart.
pub fn run_sweep(stage: ProcessStage, from: f64, to: f64, steps: usize, output_dir: &Path) -> Result<Vec<SweepPoint>> {
    println!(
        "\n--- [Workflow] Sweeping {} from {} to {} ({} points) ---",
        stage.label(),
        from,
        to,
        steps
    );

    let points = analysis::sweep_stage(stage, from, to, steps)?;

    let csv_path = output_dir.join(format!("sweep_{}.csv", stage));
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    for point in &points {
        writer.serialize(SweepRow::from(point))?;
    }
    writer.flush()?;

    if let Err(e) = plotting::plot_sweep(path_str(output_dir)?, stage, &points) {
        log::warn!("Could not render sweep chart: {:#}", e);
    }

    println!("\n{:>7} {:>8} {:>10} {:>10} {:>9} {:>9}", "ratio", "HRT (h)", "BOD", "NH3-N", "stage", "overall");
    for p in &points {
        println!(
            "{:>7.3} {:>8.2} {:>10.3} {:>10.3} {:>9} {:>9}",
            p.hrt_ratio,
            p.hrt_hours,
            p.stage_effluent.bod,
            p.stage_effluent.ammonia,
            p.stage_status.as_str(),
            p.overall_status.as_str()
        );
    }
    Ok(points)
}

/// Runs every loaded scenario into its own sub-directory, plus its sweep if one is declared.
///
/// Every scenario is checked before the first one runs, so a bad entry
/// leaves no partial output behind.
pub fn run_batch(scenarios: &BTreeMap<String, ScenarioFile>, output_dir: &Path) -> Result<()> {
    println!("\n--- [Workflow] Running Batch of {} Scenario(s) ---", scenarios.len());

    let mut plan = Vec::with_capacity(scenarios.len());
    for (name, file) in scenarios {
        scenario::validate_scenario_name(name)?;
        scenario::scenario_params(file)
            .with_context(|| format!("Invalid parameters in scenario '{}'", name))?;
        let sweep = match &file.sweep {
            Some(sweep) => {
                let stage = ProcessStage::from_token(&sweep.stage)
                    .ok_or_else(|| AquaviewError::UnknownStage(sweep.stage.clone()))
                    .with_context(|| format!("Invalid sweep in scenario '{}'", name))?;
                Some((stage, sweep))
            }
            None => None,
        };
        plan.push((name, file, sweep));
    }

    let mut outcomes = Vec::with_capacity(plan.len());
    for (name, file, sweep) in plan {
        let scenario_dir = output_dir.join(name);
        fs::create_dir_all(&scenario_dir)
            .with_context(|| format!("Failed to create {}", scenario_dir.display()))?;

        let result = run_scenario(name, &file.params, &scenario_dir)?;
        if let Some((stage, sweep)) = sweep {
            run_sweep(stage, sweep.from, sweep.to, sweep.steps, &scenario_dir)?;
        }
        outcomes.push((name.as_str(), result.overall_status));
    }

    println!("\n--- [Batch Summary] ---");
    for (name, status) in outcomes {
        println!("  - {:<30} {}", name, status.as_str().to_uppercase());
    }
    Ok(())
}

/// Prints a formatted summary of one pipeline run to the console.
fn print_summary_report(name: &str, result: &PipelineResult) {
    println!("\n\n--- [Final Summary Report: {}] ---", name);
    println!("========================================");
    println!("Stages:");
    for stage in &result.stages {
        println!(
            "  - {:<30} ratio {:>5.2} ({:>5.2} h, {})  -> {}",
            stage.stage_name,
            stage.hrt_ratio,
            stage.hrt_hours,
            ratio_band(stage.hrt_ratio).label(),
            stage.status.as_str().to_uppercase()
        );
    }
    println!("----------------------------------------");

    println!("\nTreated Water:");
    let treated = &result.treated_water;
    for metric in Metric::ALL {
        println!(
            "  - {:<18} {:>12.3} {:<10} (removed {:>5.1}%)",
            metric.label(),
            treated.get(metric),
            metric.unit(),
            result.overall_removal.get(metric)
        );
    }
    println!("  - {:<18} {:>12.2}", "pH", treated.ph);
    println!("  - {:<18} {:>12.2} mg/L", "Dissolved Oxygen", treated.do_level);

    println!("\nDischarge Compliance:");
    for (metric, status) in compliance_breakdown(treated) {
        println!("  - {:<18} {}", metric.label(), status.as_str().to_uppercase());
    }
    println!("\nOverall Status: {}", result.overall_status.as_str().to_uppercase());
    println!("========================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaview_schemas::file_formats::SweepSpec;

    #[test]
    fn run_writes_log_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let requests = vec![StageParamsRequest {
            stage: "nitrification".to_string(),
            hrt_ratio: 0.3,
        }];
        let result = run_scenario("washout", &requests, dir.path()).unwrap();
        assert_eq!(result.overall_status, Status::Danger);

        assert!(dir.path().join("stages.csv").exists());
        let json = fs::read_to_string(dir.path().join("result.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stages"][3]["hrt_ratio"], 0.3);
    }

    #[test]
    fn invalid_ratio_is_reported_with_scenario_name() {
        let dir = tempfile::tempdir().unwrap();
        let requests = vec![StageParamsRequest {
            stage: "aeration".to_string(),
            hrt_ratio: 3.0,
        }];
        let err = run_scenario("too-long", &requests, dir.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("too-long"));
        assert!(message.contains("aeration"));
        assert!(!dir.path().join("stages.csv").exists());
    }

    #[test]
    fn sweep_writes_one_row_per_point() {
        let dir = tempfile::tempdir().unwrap();
        let points = run_sweep(ProcessStage::Aeration, 0.5, 2.0, 4, dir.path()).unwrap();
        assert_eq!(points.len(), 4);
        let csv = fs::read_to_string(dir.path().join("sweep_aeration.csv")).unwrap();
        assert_eq!(csv.lines().count(), 5);
    }

    fn scenario_file(name: &str, sweep_stage: Option<&str>) -> ScenarioFile {
        ScenarioFile {
            schema_version: "1.0".to_string(),
            name: name.to_string(),
            description: None,
            params: Vec::new(),
            sweep: sweep_stage.map(|stage| SweepSpec {
                stage: stage.to_string(),
                from: 0.25,
                to: 2.5,
                steps: 5,
            }),
        }
    }

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn batch_checks_sweep_stage_before_writing_anything() {
        let dir = tempfile::tempdir().unwrap();
        let mut scenarios = BTreeMap::new();
        // sorts ahead of the broken entry, so it would run first
        scenarios.insert("a-design".to_string(), scenario_file("a-design", None));
        scenarios.insert("bad".to_string(), scenario_file("bad", Some("ozonation")));

        let err = run_batch(&scenarios, dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("ozonation"));
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn batch_rejects_names_that_leave_the_output_directory() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("runs");
        fs::create_dir_all(&output).unwrap();
        let mut scenarios = BTreeMap::new();
        scenarios.insert("../escape".to_string(), scenario_file("../escape", None));

        assert!(run_batch(&scenarios, &output).is_err());
        assert_eq!(entries(root.path()), 1);
        assert_eq!(entries(&output), 0);
    }

    #[test]
    fn batch_runs_each_scenario_into_its_own_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut scenarios = BTreeMap::new();
        scenarios.insert("design".to_string(), scenario_file("design", None));
        scenarios.insert("sweep".to_string(), scenario_file("sweep", Some("aeration")));

        run_batch(&scenarios, dir.path()).unwrap();
        assert!(dir.path().join("design/stages.csv").exists());
        assert!(dir.path().join("sweep/sweep_aeration.csv").exists());
    }
}
