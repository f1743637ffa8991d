//! Fixed plant data: raw influent profile, design retention times and the
//! threshold tables used by the status classifier.

use aquaview_schemas::{stage::ProcessStage, water_quality::{Metric, WaterQuality}};

/// Typical municipal raw sewage entering the plant.
pub const RAW_WATER: WaterQuality = WaterQuality {
    bod: 200.0,
    tss: 220.0,
    cod: 400.0,
    ammonia: 35.0,
    turbidity: 50.0,
    ph: 7.2,
    do_level: 0.5,
    coliform: 1_000_000.0,
};

pub const MIN_HRT_RATIO: f64 = 0.25;
pub const MAX_HRT_RATIO: f64 = 2.5;
pub const DESIGN_HRT_RATIO: f64 = 1.0;

/// Design hydraulic retention time of a stage, in hours.
pub fn design_hrt_hours(stage: ProcessStage) -> f64 {
    match stage {
        ProcessStage::PrimarySettling => 2.0,
        ProcessStage::Aeration => 6.0,
        ProcessStage::SecondarySettling => 1.5,
        ProcessStage::Nitrification => 10.0,
        ProcessStage::Disinfection => 0.5,
    }
}

/// Levels at which a metric escalates to warning and to danger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub metric: Metric,
    pub warning: f64,
    pub danger: f64,
}

/// Interim process-health thresholds applied to every stage effluent.
/// A value at or above a threshold trips it.
pub const STAGE_THRESHOLDS: [Thresholds; 5] = [
    Thresholds { metric: Metric::Bod, warning: 50.0, danger: 100.0 },
    Thresholds { metric: Metric::Tss, warning: 40.0, danger: 80.0 },
    Thresholds { metric: Metric::Cod, warning: 80.0, danger: 180.0 },
    Thresholds { metric: Metric::Ammonia, warning: 10.0, danger: 25.0 },
    Thresholds { metric: Metric::Turbidity, warning: 10.0, danger: 25.0 },
];

/// Regulatory limits for one metric: the most a compliant value may reach,
/// and the most a value may reach before it is a violation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub metric: Metric,
    pub normal: f64,
    pub warning: f64,
}

/// Regulatory effluent standards for treated water. A value strictly above
/// `normal` is a warning; strictly above `warning` is danger.
pub const EFFLUENT_STANDARDS: [Limits; 6] = [
    Limits { metric: Metric::Bod, normal: 10.0, warning: 20.0 },
    Limits { metric: Metric::Tss, normal: 10.0, warning: 30.0 },
    Limits { metric: Metric::Cod, normal: 40.0, warning: 80.0 },
    Limits { metric: Metric::Ammonia, normal: 1.0, warning: 5.0 },
    Limits { metric: Metric::Turbidity, normal: 2.0, warning: 5.0 },
    Limits { metric: Metric::Coliform, normal: 10.0, warning: 100.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_hrt_matches_plant_layout() {
        let hours: Vec<f64> = ProcessStage::ORDER.iter().map(|s| design_hrt_hours(*s)).collect();
        assert_eq!(hours, vec![2.0, 6.0, 1.5, 10.0, 0.5]);
    }

    #[test]
    fn standards_cover_every_tracked_metric() {
        let metrics: Vec<Metric> = EFFLUENT_STANDARDS.iter().map(|l| l.metric).collect();
        assert_eq!(metrics, Metric::ALL.to_vec());
    }

    #[test]
    fn ammonia_standard_allows_up_to_one_then_five() {
        let ammonia = EFFLUENT_STANDARDS.iter().find(|l| l.metric == Metric::Ammonia).unwrap();
        assert_eq!((ammonia.normal, ammonia.warning), (1.0, 5.0));
        for limits in &EFFLUENT_STANDARDS {
            assert!(limits.normal < limits.warning, "{:?}", limits.metric);
        }
    }
}
