//! Stage transfer functions.
//!
//! Each stage maps an influent snapshot and an HRT ratio to a new effluent
//! snapshot. Primary pollutants follow calibrated sigmoid removal curves;
//! secondary metrics get fixed adjustments. Outputs are rounded to the
//! display precision of each metric so repeated runs are bit-identical.

use super::curve::{round_to, SigmoidCurve};
use aquaview_schemas::{stage::ProcessStage, water_quality::WaterQuality};

// Primary settling: gravity sedimentation of settleable solids.
const PRIMARY_TSS: SigmoidCurve = SigmoidCurve::new(0.35, 0.78, 2.5);
const PRIMARY_BOD: SigmoidCurve = SigmoidCurve::new(0.25, 0.58, 2.5);
const PRIMARY_COD: SigmoidCurve = SigmoidCurve::new(0.20, 0.45, 2.5);
const PRIMARY_TURBIDITY: SigmoidCurve = SigmoidCurve::new(0.30, 0.70, 2.5);

// Aeration: activated sludge oxidation of organics, partial nitrification.
const AERATION_BOD: SigmoidCurve = SigmoidCurve::new(0.55, 0.97, 3.0);
const AERATION_COD: SigmoidCurve = SigmoidCurve::new(0.45, 0.92, 3.0);
const AERATION_TSS: SigmoidCurve = SigmoidCurve::new(0.20, 0.55, 2.5);
const AERATION_AMMONIA: SigmoidCurve = SigmoidCurve::new(0.05, 0.40, 2.0);

// Secondary settling: separates biological floc from treated water.
const SECONDARY_TSS: SigmoidCurve = SigmoidCurve::new(0.50, 0.88, 3.0);
const SECONDARY_BOD: SigmoidCurve = SigmoidCurve::new(0.20, 0.50, 2.5);
const SECONDARY_TURBIDITY: SigmoidCurve = SigmoidCurve::new(0.40, 0.80, 3.0);

/// Nitrifiers grow slowly and wash out at short retention times, hence the
/// steep curve shifted left of the design point.
const NITRIFICATION_AMMONIA: SigmoidCurve = SigmoidCurve::new(0.10, 0.97, 4.5).with_midpoint(0.8);

/// Coliform log10 reduction from chlorine contact time.
const DISINFECTION_LOG_REDUCTION: SigmoidCurve = SigmoidCurve::new(2.0, 5.5, 3.0);
const DISINFECTION_TURBIDITY: SigmoidCurve = SigmoidCurve::new(0.50, 0.97, 3.0);

/// Coliform counts never drop below one organism per sample.
pub const COLIFORM_FLOOR: f64 = 1.0;

/// Inclusive pH band a stage clamps its effluent into.
pub fn ph_band(stage: ProcessStage) -> (f64, f64) {
    match stage {
        ProcessStage::PrimarySettling => (6.0, 9.0),
        ProcessStage::Aeration | ProcessStage::SecondarySettling | ProcessStage::Disinfection => (6.5, 8.5),
        ProcessStage::Nitrification => (6.0, 8.5),
    }
}

/// Runs the transfer function of `stage`.
pub fn transfer(stage: ProcessStage, influent: &WaterQuality, hrt_ratio: f64) -> WaterQuality {
    match stage {
        ProcessStage::PrimarySettling => primary_settling(influent, hrt_ratio),
        ProcessStage::Aeration => aeration(influent, hrt_ratio),
        ProcessStage::SecondarySettling => secondary_settling(influent, hrt_ratio),
        ProcessStage::Nitrification => nitrification(influent, hrt_ratio),
        ProcessStage::Disinfection => disinfection(influent, hrt_ratio),
    }
}

pub fn primary_settling(influent: &WaterQuality, hrt_ratio: f64) -> WaterQuality {
    let (ph_lo, ph_hi) = ph_band(ProcessStage::PrimarySettling);

    WaterQuality {
        bod: round_to(influent.bod * (1.0 - PRIMARY_BOD.removal(hrt_ratio)), 2),
        tss: round_to(influent.tss * (1.0 - PRIMARY_TSS.removal(hrt_ratio)), 2),
        cod: round_to(influent.cod * (1.0 - PRIMARY_COD.removal(hrt_ratio)), 2),
        ammonia: round_to(influent.ammonia * 0.98, 2),
        turbidity: round_to(influent.turbidity * (1.0 - PRIMARY_TURBIDITY.removal(hrt_ratio)), 2),
        ph: round_to((influent.ph + 0.05).clamp(ph_lo, ph_hi), 2),
        do_level: round_to((influent.do_level + 0.2).clamp(0.0, 4.0), 2),
        coliform: round_to(influent.coliform * 0.85, 0),
    }
}

pub fn aeration(influent: &WaterQuality, hrt_ratio: f64) -> WaterQuality {
    let (ph_lo, ph_hi) = ph_band(ProcessStage::Aeration);
    let do_out = (2.0 + hrt_ratio * 0.8).clamp(1.0, 5.0);

    WaterQuality {
        bod: round_to(influent.bod * (1.0 - AERATION_BOD.removal(hrt_ratio)), 2),
        tss: round_to(influent.tss * (1.0 - AERATION_TSS.removal(hrt_ratio)), 2),
        cod: round_to(influent.cod * (1.0 - AERATION_COD.removal(hrt_ratio)), 2),
        ammonia: round_to(influent.ammonia * (1.0 - AERATION_AMMONIA.removal(hrt_ratio)), 2),
        // biological floc traps fine particles
        turbidity: round_to(influent.turbidity * 0.70, 2),
        ph: round_to((influent.ph - 0.1 * hrt_ratio).clamp(ph_lo, ph_hi), 2),
        do_level: round_to(do_out, 2),
        coliform: round_to(influent.coliform * 0.80, 0),
    }
}

pub fn secondary_settling(influent: &WaterQuality, hrt_ratio: f64) -> WaterQuality {
    let (ph_lo, ph_hi) = ph_band(ProcessStage::SecondarySettling);

    WaterQuality {
        bod: round_to(influent.bod * (1.0 - SECONDARY_BOD.removal(hrt_ratio)), 2),
        tss: round_to(influent.tss * (1.0 - SECONDARY_TSS.removal(hrt_ratio)), 2),
        cod: round_to(influent.cod * 0.85, 2),
        ammonia: round_to(influent.ammonia * 0.97, 2),
        turbidity: round_to(influent.turbidity * (1.0 - SECONDARY_TURBIDITY.removal(hrt_ratio)), 2),
        ph: round_to(influent.ph.clamp(ph_lo, ph_hi), 2),
        do_level: round_to((influent.do_level - 0.3).clamp(1.0, 5.0), 2),
        coliform: round_to(influent.coliform * 0.70, 0),
    }
}

pub fn nitrification(influent: &WaterQuality, hrt_ratio: f64) -> WaterQuality {
    let (ph_lo, ph_hi) = ph_band(ProcessStage::Nitrification);
    let ammonia_removal = NITRIFICATION_AMMONIA.removal(hrt_ratio);
    // nitrification releases acid and consumes oxygen in proportion to ammonia oxidised
    let ph_drop = 0.3 * ammonia_removal;
    let do_out = (influent.do_level - 1.0 * ammonia_removal + 1.5).clamp(1.0, 5.0);

    WaterQuality {
        bod: round_to(influent.bod * 0.90, 2),
        tss: round_to(influent.tss * 0.92, 2),
        cod: round_to(influent.cod * 0.88, 2),
        ammonia: round_to(influent.ammonia * (1.0 - ammonia_removal), 3),
        turbidity: round_to(influent.turbidity * 0.85, 2),
        ph: round_to((influent.ph - ph_drop).clamp(ph_lo, ph_hi), 2),
        do_level: round_to(do_out, 2),
        coliform: round_to(influent.coliform * 0.60, 0),
    }
}

pub fn disinfection(influent: &WaterQuality, hrt_ratio: f64) -> WaterQuality {
    let (ph_lo, ph_hi) = ph_band(ProcessStage::Disinfection);
    let log_reduction = DISINFECTION_LOG_REDUCTION.removal(hrt_ratio);
    let coliform_out = (influent.coliform / 10f64.powf(log_reduction)).max(COLIFORM_FLOOR);

    WaterQuality {
        bod: round_to(influent.bod * 0.85, 2),
        tss: round_to(influent.tss * 0.80, 2),
        cod: round_to(influent.cod * 0.85, 2),
        ammonia: round_to(influent.ammonia * 0.95, 3),
        turbidity: round_to(influent.turbidity * (1.0 - DISINFECTION_TURBIDITY.removal(hrt_ratio)), 2),
        // residual chlorine
        ph: round_to((influent.ph + 0.1).clamp(ph_lo, ph_hi), 2),
        do_level: round_to((influent.do_level + 0.5).clamp(3.0, 8.0), 2),
        coliform: round_to(coliform_out, 1),
    }
}

/// Ammonia removal fraction of the nitrification stage at `hrt_ratio`.
pub fn nitrification_ammonia_removal(hrt_ratio: f64) -> f64 {
    NITRIFICATION_AMMONIA.removal(hrt_ratio)
}
