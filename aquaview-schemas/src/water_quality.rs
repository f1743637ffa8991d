use serde::{Deserialize, Serialize};

/// Snapshot of the eight water-quality metrics at one point in the treatment train.
///
/// Every stage produces a fresh value; nothing mutates a snapshot after it is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    /// Biochemical oxygen demand, mg/L.
    pub bod: f64,
    /// Total suspended solids, mg/L.
    pub tss: f64,
    /// Chemical oxygen demand, mg/L.
    pub cod: f64,
    /// Ammonia as nitrogen, mg/L.
    pub ammonia: f64,
    /// Turbidity, NTU.
    pub turbidity: f64,
    pub ph: f64,
    /// Dissolved oxygen, mg/L.
    pub do_level: f64,
    /// Total coliform, CFU/100mL.
    pub coliform: f64,
}

impl WaterQuality {
    /// Reads one of the tracked metrics.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Bod => self.bod,
            Metric::Tss => self.tss,
            Metric::Cod => self.cod,
            Metric::Ammonia => self.ammonia,
            Metric::Turbidity => self.turbidity,
            Metric::Coliform => self.coliform,
        }
    }
}

/// The six metrics tracked for removal efficiency and regulatory compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Bod,
    Tss,
    Cod,
    Ammonia,
    Turbidity,
    Coliform,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Bod,
        Metric::Tss,
        Metric::Cod,
        Metric::Ammonia,
        Metric::Turbidity,
        Metric::Coliform,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Bod => "bod",
            Metric::Tss => "tss",
            Metric::Cod => "cod",
            Metric::Ammonia => "ammonia",
            Metric::Turbidity => "turbidity",
            Metric::Coliform => "coliform",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Bod => "BOD",
            Metric::Tss => "TSS",
            Metric::Cod => "COD",
            Metric::Ammonia => "NH3-N",
            Metric::Turbidity => "Turbidity",
            Metric::Coliform => "Coliform",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Bod | Metric::Tss | Metric::Cod | Metric::Ammonia => "mg/L",
            Metric::Turbidity => "NTU",
            Metric::Coliform => "CFU/100mL",
        }
    }
}
