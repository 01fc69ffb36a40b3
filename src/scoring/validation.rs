use super::config::{ScoringConfig, ScoringModel};
use std::collections::HashSet;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// Checks run against the effective values, so a `critical` list is checked
/// against the default weights when `weights` is left out.
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref weights) = config.weights {
        if weights.is_empty() {
            errors.push("scoring.weights: must list at least one indicator".to_string());
        }

        let mut seen = HashSet::new();
        for (i, indicator) in weights.iter().enumerate() {
            if indicator.name.trim().is_empty() {
                errors.push(format!("scoring.weights[{}].name: must not be empty", i));
            } else if !seen.insert(indicator.name.as_str()) {
                errors.push(format!(
                    "scoring.weights[{}].name: duplicate indicator '{}'",
                    i, indicator.name
                ));
            }
            if !indicator.weight.is_finite() || indicator.weight < 0.0 {
                errors.push(format!(
                    "scoring.weights[{}].weight: must be a non-negative number, got {}",
                    i, indicator.weight
                ));
            }
        }

        if !weights.is_empty() && weights.iter().all(|w| w.weight == 0.0) {
            errors.push("scoring.weights: at least one weight must be positive".to_string());
        }
    }

    if let Some(threshold) = config.veto_threshold {
        if !(0.0..=100.0).contains(&threshold) {
            errors.push(format!(
                "scoring.veto_threshold: must be between 0 and 100, got {}",
                threshold
            ));
        }
    }

    // Cross-references are checked on the resolved model
    let model = ScoringModel::from_config(config);

    for (i, name) in model.critical().iter().enumerate() {
        if model.weight_of(name).is_none() {
            errors.push(format!(
                "scoring.critical[{}]: '{}' is not a weighted indicator",
                i, name
            ));
        }
    }

    if model.weight_of(model.patrimonial_indicator()).is_none() {
        errors.push(format!(
            "scoring.patrimonial_indicator: '{}' is not a weighted indicator",
            model.patrimonial_indicator()
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::IndicatorWeight;

    fn empty_config() -> ScoringConfig {
        ScoringConfig {
            weights: None,
            critical: None,
            veto_threshold: None,
            patrimonial_indicator: None,
        }
    }

    fn weight(name: &str, weight: f64) -> IndicatorWeight {
        IndicatorWeight {
            name: name.to_string(),
            weight,
        }
    }

    #[test]
    fn test_valid_default_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&empty_config()).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            weights: Some(vec![
                weight("RIESGO_PATRIMONIAL_CALCULADO", 0.5),
                weight("DENUNCIAS_SCORE", -0.1),
            ]),
            critical: Some(vec![]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights[1].weight"));
    }

    #[test]
    fn test_duplicate_indicator() {
        let config = ScoringConfig {
            weights: Some(vec![
                weight("RIESGO_PATRIMONIAL_CALCULADO", 0.5),
                weight("RIESGO_PATRIMONIAL_CALCULADO", 0.5),
            ]),
            critical: Some(vec![]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("duplicate indicator"));
    }

    #[test]
    fn test_all_zero_weights() {
        let config = ScoringConfig {
            weights: Some(vec![weight("RIESGO_PATRIMONIAL_CALCULADO", 0.0)]),
            critical: Some(vec![]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("at least one weight must be positive"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = ScoringConfig {
            veto_threshold: Some(120.0),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.veto_threshold"));
    }

    #[test]
    fn test_critical_must_be_weighted() {
        let config = ScoringConfig {
            critical: Some(vec!["DENUNCIAS_SCORE".to_string(), "UNKNOWN".to_string()]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.critical[1]"));
    }

    #[test]
    fn test_default_critical_checked_against_custom_weights() {
        // Default critical list names indicators missing from these weights
        let config = ScoringConfig {
            weights: Some(vec![weight("RIESGO_PATRIMONIAL_CALCULADO", 1.0)]),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_patrimonial_indicator_must_be_weighted() {
        let config = ScoringConfig {
            patrimonial_indicator: Some("PATRIMONIO".to_string()),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.patrimonial_indicator"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            veto_threshold: Some(-1.0),                            // Error 1
            critical: Some(vec!["NOPE".to_string()]),              // Error 2
            patrimonial_indicator: Some("ALSO_NOPE".to_string()),  // Error 3
            weights: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
