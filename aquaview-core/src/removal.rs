use crate::simulation::curve::round_to;
use aquaview_schemas::{pipeline::RemovalEfficiencies, water_quality::WaterQuality};

/// Percent reduction from `before` to `after`, rounded to one decimal.
/// A non-positive baseline has nothing to remove and yields 0.0.
pub fn percent_removal(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    round_to((before - after) / before * 100.0, 1)
}

pub fn removal_efficiencies(influent: &WaterQuality, effluent: &WaterQuality) -> RemovalEfficiencies {
    RemovalEfficiencies {
        bod: percent_removal(influent.bod, effluent.bod),
        tss: percent_removal(influent.tss, effluent.tss),
        cod: percent_removal(influent.cod, effluent.cod),
        ammonia: percent_removal(influent.ammonia, effluent.ammonia),
        turbidity: percent_removal(influent.turbidity, effluent.turbidity),
        coliform: percent_removal(influent.coliform, effluent.coliform),
    }
}
