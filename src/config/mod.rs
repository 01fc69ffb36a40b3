mod init;
mod schema;

pub use init::write_default_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/serc/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("serc"))
}

/// Get the default config file path (~/.config/serc/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/serc/config.yaml)
///
/// A missing default file yields the built-in defaults. A missing file that
/// was asked for explicitly is an error.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config path does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate every section of the config at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = crate::scoring::validate_scoring(&config.effective_scoring()) {
        errors.extend(e);
    }
    if let Err(e) = crate::output::validate_bands(&config.bands()) {
        errors.extend(e);
    }

    let columns = config.columns();
    for (field, value) in [
        ("id", &columns.id),
        ("name", &columns.name),
        ("role", &columns.role),
        ("income", &columns.income),
        ("net_worth", &columns.net_worth),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("columns.{}: must not be empty", field));
        }
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
    use std::env;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scoring_model(), crate::scoring::ScoringModel::default());
        assert_eq!(config.columns().id, "POLÍTICO_ID");
        assert_eq!(config.bands().high, 65.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
scoring:
  veto_threshold: 90
  critical: [DENUNCIAS_SCORE]
  weights:
    - { name: RIESGO_PATRIMONIAL_CALCULADO, weight: 0.5 }
    - { name: DENUNCIAS_SCORE, weight: 0.5 }
columns:
  id: ID
bands:
  moderate: 30
  high: 60
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let model = config.scoring_model();
        assert_eq!(model.veto_threshold(), 90.0);
        assert_eq!(model.indicators().len(), 2);
        assert_eq!(config.columns().id, "ID");
        assert_eq!(config.bands().moderate, 30.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_collects_across_sections() {
        let yaml = r#"
scoring:
  veto_threshold: 150
bands:
  moderate: 80
  high: 40
columns:
  id: ""
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_load_explicit_missing_path_is_error() {
        let temp_path = env::temp_dir().join("serc_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_path = env::temp_dir().join("serc_test_load_config.yaml");
        fs::write(&temp_path, "bands:\n  high: 70\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.bands().high, 70.0);
        assert!(config.scoring.is_none());

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml_is_error() {
        let temp_path = env::temp_dir().join("serc_test_invalid_config.yaml");
        fs::write(&temp_path, "scoring: [unclosed").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }
}
