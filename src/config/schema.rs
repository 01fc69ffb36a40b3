use serde::{Deserialize, Serialize};

use crate::ingest::ColumnConfig;
use crate::output::BandConfig;
use crate::scoring::{ScoringConfig, ScoringModel};

/// Top-level config file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
    #[serde(default)]
    pub columns: Option<ColumnConfig>,
    #[serde(default)]
    pub bands: Option<BandConfig>,
}

impl Config {
    /// Config with every section filled in with the defaults
    pub fn with_defaults() -> Self {
        Self {
            scoring: Some(ScoringConfig::default()),
            columns: Some(ColumnConfig::default()),
            bands: Some(BandConfig::default()),
        }
    }

    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn scoring_model(&self) -> ScoringModel {
        ScoringModel::from_config(&self.effective_scoring())
    }

    pub fn columns(&self) -> ColumnConfig {
        self.columns.clone().unwrap_or_default()
    }

    pub fn bands(&self) -> BandConfig {
        self.bands.unwrap_or_default()
    }
}
