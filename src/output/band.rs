//! Risk banding for display. Purely presentational: the scoring engine never
//! looks at bands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score thresholds that separate the three bands.
///
/// Example YAML:
/// ```yaml
/// bands:
///   moderate: 35
///   high: 65
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    /// Scores at or above this are at least Moderate
    #[serde(default = "default_moderate")]
    pub moderate: f64,

    /// Scores at or above this are High
    #[serde(default = "default_high")]
    pub high: f64,
}

fn default_moderate() -> f64 {
    35.0
}

fn default_high() -> f64 {
    65.0
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            moderate: default_moderate(),
            high: default_high(),
        }
    }
}

impl BandConfig {
    pub fn classify(&self, score: f64) -> RiskBand {
        if score < self.moderate {
            RiskBand::Low
        } else if score < self.high {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Moderate => "MODERATE",
            RiskBand::High => "HIGH",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskBand::Low => "Stable profile.",
            RiskBand::Moderate => "Caution: anomalies detected.",
            RiskBand::High => "CRITICAL ALERT: high-risk profile.",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validate band thresholds. Returns all errors at once.
pub fn validate_bands(bands: &BandConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (field, value) in [("moderate", bands.moderate), ("high", bands.high)] {
        if !(0.0..=100.0).contains(&value) {
            errors.push(format!("bands.{}: must be between 0 and 100, got {}", field, value));
        }
    }
    if bands.moderate > bands.high {
        errors.push(format!(
            "bands: moderate ({}) must not exceed high ({})",
            bands.moderate, bands.high
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
