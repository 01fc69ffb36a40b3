use serde::{Deserialize, Serialize};

/// Name of the indicator derived from income and net worth
pub const PATRIMONIAL_INDICATOR: &str = "RIESGO_PATRIMONIAL_CALCULADO";

/// Default veto threshold on the 0-100 indicator scale
pub const DEFAULT_VETO_THRESHOLD: f64 = 85.0;

const DEFAULT_WEIGHTS: [(&str, f64); 9] = [
    (PATRIMONIAL_INDICATOR, 0.25),
    ("COMPRAS_PRIVADAS_SCORE", 0.15),
    ("DENUNCIAS_SCORE", 0.15),
    ("N_PROCESOS_JUDICIAL", 0.10),
    ("RIESGO_ETICO_SCORE", 0.10),
    ("TRANSFUGUISMO", 0.10),
    ("PRENSA_NEGATIVA_SCORE", 0.08),
    ("PERIODOS_EN_PODER", 0.05),
    ("PROCESOS_ELECTORAL_SCORE", 0.02),
];

const DEFAULT_CRITICAL: [&str; 4] = [
    PATRIMONIAL_INDICATOR,
    "COMPRAS_PRIVADAS_SCORE",
    "DENUNCIAS_SCORE",
    "RIESGO_ETICO_SCORE",
];

/// Scoring section of the config file.
///
/// Every field is optional; anything left out falls back to the built-in
/// model. Weights are listed in evaluation order.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   veto_threshold: 85
///   critical: [RIESGO_PATRIMONIAL_CALCULADO, DENUNCIAS_SCORE]
///   weights:
///     - { name: RIESGO_PATRIMONIAL_CALCULADO, weight: 0.5 }
///     - { name: DENUNCIAS_SCORE, weight: 0.5 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Ordered indicator weights
    #[serde(default)]
    pub weights: Option<Vec<IndicatorWeight>>,

    /// Indicators that force the maximum score on their own
    #[serde(default)]
    pub critical: Option<Vec<String>>,

    /// A critical indicator at or above this value triggers the veto
    #[serde(default)]
    pub veto_threshold: Option<f64>,

    /// Name under which the derived patrimonial score is stored
    #[serde(default)]
    pub patrimonial_indicator: Option<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(default_weights()),
            critical: Some(DEFAULT_CRITICAL.iter().map(|s| s.to_string()).collect()),
            veto_threshold: Some(DEFAULT_VETO_THRESHOLD),
            patrimonial_indicator: Some(PATRIMONIAL_INDICATOR.to_string()),
        }
    }
}

/// A single named indicator and its weight.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndicatorWeight {
    pub name: String,
    pub weight: f64,
}

fn default_weights() -> Vec<IndicatorWeight> {
    DEFAULT_WEIGHTS
        .iter()
        .map(|(name, weight)| IndicatorWeight {
            name: name.to_string(),
            weight: *weight,
        })
        .collect()
}

/// Resolved, immutable scoring model.
///
/// Built once at startup from a validated [`ScoringConfig`] and passed by
/// reference to the scorer and the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    indicators: Vec<IndicatorWeight>,
    critical: Vec<String>,
    veto_threshold: f64,
    patrimonial_indicator: String,
}

impl ScoringModel {
    /// Resolve a config into a model, filling gaps with the defaults.
    ///
    /// Weights that do not add up to 1.0 are scaled so they do.
    pub fn from_config(config: &ScoringConfig) -> Self {
        let mut indicators = config.weights.clone().unwrap_or_else(default_weights);

        let total: f64 = indicators.iter().map(|i| i.weight).sum();
        if total > 0.0 && (total - 1.0).abs() > 1e-9 {
            for indicator in &mut indicators {
                indicator.weight /= total;
            }
        }

        Self {
            indicators,
            critical: config
                .critical
                .clone()
                .unwrap_or_else(|| DEFAULT_CRITICAL.iter().map(|s| s.to_string()).collect()),
            veto_threshold: config.veto_threshold.unwrap_or(DEFAULT_VETO_THRESHOLD),
            patrimonial_indicator: config
                .patrimonial_indicator
                .clone()
                .unwrap_or_else(|| PATRIMONIAL_INDICATOR.to_string()),
        }
    }

    pub fn indicators(&self) -> &[IndicatorWeight] {
        &self.indicators
    }

    pub fn critical(&self) -> &[String] {
        &self.critical
    }

    pub fn veto_threshold(&self) -> f64 {
        self.veto_threshold
    }

    pub fn patrimonial_indicator(&self) -> &str {
        &self.patrimonial_indicator
    }

    pub fn is_critical(&self, name: &str) -> bool {
        self.critical.iter().any(|c| c == name)
    }

    pub fn weight_of(&self, name: &str) -> Option<f64> {
        self.indicators
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.weight)
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.weights.as_ref().map(|w| w.len()), Some(9));
        assert_eq!(config.critical.as_ref().map(|c| c.len()), Some(4));
        assert_eq!(config.veto_threshold, Some(85.0));
        assert_eq!(
            config.patrimonial_indicator.as_deref(),
            Some("RIESGO_PATRIMONIAL_CALCULADO")
        );
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let model = ScoringModel::default();
        let total: f64 = model.indicators().iter().map(|i| i.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(model.weight_of("DENUNCIAS_SCORE"), Some(0.15));
        assert_eq!(model.weight_of("RIESGO_PATRIMONIAL_CALCULADO"), Some(0.25));
    }

    #[test]
    fn test_default_order_is_stable() {
        let model = ScoringModel::default();
        let names: Vec<&str> = model.indicators().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names[0], "RIESGO_PATRIMONIAL_CALCULADO");
        assert_eq!(names[8], "PROCESOS_ELECTORAL_SCORE");
        assert_eq!(
            model.critical(),
            &[
                "RIESGO_PATRIMONIAL_CALCULADO",
                "COMPRAS_PRIVADAS_SCORE",
                "DENUNCIAS_SCORE",
                "RIESGO_ETICO_SCORE"
            ]
        );
    }

    #[test]
    fn test_weights_treated_as_relative() {
        let config = ScoringConfig {
            weights: Some(vec![
                IndicatorWeight { name: "A".to_string(), weight: 1.5 },
                IndicatorWeight { name: "B".to_string(), weight: 0.5 },
            ]),
            critical: None,
            veto_threshold: None,
            patrimonial_indicator: Some("A".to_string()),
        };
        let model = ScoringModel::from_config(&config);
        assert!((model.weight_of("A").unwrap() - 0.75).abs() < 1e-12);
        assert!((model.weight_of("B").unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
veto_threshold: 90
critical: [DENUNCIAS_SCORE]
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.veto_threshold, Some(90.0));
        assert!(config.weights.is_none());

        let model = ScoringModel::from_config(&config);
        assert_eq!(model.veto_threshold(), 90.0);
        assert_eq!(model.critical(), &["DENUNCIAS_SCORE"]);
        assert_eq!(model.indicators().len(), 9);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.weights.is_none());
        assert!(config.critical.is_none());
        assert_eq!(ScoringModel::from_config(&config), ScoringModel::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str("base_score: 100");
        assert!(result.is_err());
    }
}
