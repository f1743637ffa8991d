/// Calibration of a sigmoid-shaped removal curve.
///
/// The removal fraction runs from `r_min` (ratio -> 0) to `r_max`
/// (ratio -> infinity) and sits exactly halfway between them at `midpoint`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidCurve {
    pub r_min: f64,
    pub r_max: f64,
    pub steepness: f64,
    pub midpoint: f64,
}

impl SigmoidCurve {
    /// A curve centred on the design retention time.
    pub const fn new(r_min: f64, r_max: f64, steepness: f64) -> Self {
        Self { r_min, r_max, steepness, midpoint: 1.0 }
    }

    pub const fn with_midpoint(self, midpoint: f64) -> Self {
        Self { midpoint, ..self }
    }

    pub fn removal(&self, hrt_ratio: f64) -> f64 {
        sigmoid_removal(hrt_ratio, self.r_min, self.r_max, self.steepness, self.midpoint)
    }
}

pub fn sigmoid_removal(hrt_ratio: f64, r_min: f64, r_max: f64, steepness: f64, midpoint: f64) -> f64 {
    let x = steepness * (hrt_ratio - midpoint);
    let sigmoid = 1.0 / (1.0 + (-x).exp());
    r_min + (r_max - r_min) * sigmoid
}

/// Rounds to `decimals` places using the exact decimal value of `value`,
/// with exact ties going to the even digit.
///
/// Scaling by a power of ten first would round `value * 10^d` in binary and
/// turn values such as `7.25 - 0.035` into false ties.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let places = decimals.max(0) as usize;
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
