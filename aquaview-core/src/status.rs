//! Severity classification of water-quality snapshots.
//!
//! Two policies share the three-level [`Status`]: an interim process-health
//! check applied after every stage, and the regulatory check applied to the
//! treated water leaving the plant.

use crate::constants::{Limits, EFFLUENT_STANDARDS, STAGE_THRESHOLDS};
use aquaview_schemas::{status::Status, water_quality::{Metric, WaterQuality}};

/// Worst-case process-health status of a stage effluent.
///
/// Danger as soon as any metric reaches its danger threshold; otherwise
/// warning if any metric reached its warning threshold.
pub fn assess_stage_status(effluent: &WaterQuality) -> Status {
    let mut worst = Status::Normal;
    for t in &STAGE_THRESHOLDS {
        let value = effluent.get(t.metric);
        if value >= t.danger {
            return Status::Danger;
        }
        if value >= t.warning {
            worst = Status::Warning;
        }
    }
    worst
}

/// Regulatory status of the treated water.
pub fn assess_final_status(treated: &WaterQuality) -> Status {
    let mut worst = Status::Normal;
    for t in &EFFLUENT_STANDARDS {
        match regulatory_status(t, treated.get(t.metric)) {
            Status::Danger => return Status::Danger,
            Status::Warning => worst = Status::Warning,
            Status::Normal => {}
        }
    }
    worst
}

/// Per-metric regulatory status, in standards-table order.
pub fn compliance_breakdown(treated: &WaterQuality) -> Vec<(Metric, Status)> {
    EFFLUENT_STANDARDS
        .iter()
        .map(|t| (t.metric, regulatory_status(t, treated.get(t.metric))))
        .collect()
}

fn regulatory_status(limits: &Limits, value: f64) -> Status {
    if value > limits.warning {
        Status::Danger
    } else if value > limits.normal {
        Status::Warning
    } else {
        Status::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_water() -> WaterQuality {
        WaterQuality {
            bod: 5.0,
            tss: 5.0,
            cod: 20.0,
            ammonia: 0.5,
            turbidity: 1.0,
            ph: 7.0,
            do_level: 5.0,
            coliform: 2.0,
        }
    }

    #[test]
    fn stage_thresholds_are_inclusive() {
        let at_warning = WaterQuality { bod: 50.0, ..clean_water() };
        assert_eq!(assess_stage_status(&at_warning), Status::Warning);

        let at_danger = WaterQuality { turbidity: 25.0, ..clean_water() };
        assert_eq!(assess_stage_status(&at_danger), Status::Danger);

        let below = WaterQuality { ammonia: 9.99, ..clean_water() };
        assert_eq!(assess_stage_status(&below), Status::Normal);
    }

    #[test]
    fn stage_danger_wins_regardless_of_order() {
        // first metric only warns, last metric is in danger
        let mixed = WaterQuality { bod: 60.0, turbidity: 30.0, ..clean_water() };
        assert_eq!(assess_stage_status(&mixed), Status::Danger);
    }

    #[test]
    fn stage_policy_ignores_coliform() {
        let dirty = WaterQuality { coliform: 1e9, ..clean_water() };
        assert_eq!(assess_stage_status(&dirty), Status::Normal);
    }

    #[test]
    fn regulatory_limits_are_exclusive() {
        let at_normal_limit = WaterQuality { bod: 10.0, ..clean_water() };
        assert_eq!(assess_final_status(&at_normal_limit), Status::Normal);

        let above_normal = WaterQuality { bod: 10.01, ..clean_water() };
        assert_eq!(assess_final_status(&above_normal), Status::Warning);

        let at_warning_limit = WaterQuality { ammonia: 5.0, ..clean_water() };
        assert_eq!(assess_final_status(&at_warning_limit), Status::Warning);

        let above_warning = WaterQuality { coliform: 100.5, ..clean_water() };
        assert_eq!(assess_final_status(&above_warning), Status::Danger);
    }

    #[test]
    fn overall_status_is_worst_of_breakdown() {
        let treated = WaterQuality { tss: 13.65, ammonia: 6.893, ..clean_water() };
        let breakdown = compliance_breakdown(&treated);
        assert_eq!(breakdown.len(), 6);
        assert!(breakdown.contains(&(Metric::Tss, Status::Warning)));
        assert!(breakdown.contains(&(Metric::Ammonia, Status::Danger)));
        let worst = breakdown.iter().map(|(_, s)| *s).max();
        assert_eq!(worst, Some(assess_final_status(&treated)));
    }
}
