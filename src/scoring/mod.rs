pub mod config;
pub mod engine;
pub mod financial;
pub mod validation;

pub use config::*;
pub use engine::{
    aggregate, aggregate_rows, check_veto, score_official, weighted_sum, IndicatorContribution,
    IndicatorValue, ScoringResult,
};
pub use financial::{augment, derive_patrimonial_risk, ratio_score, wealth_ratio};
pub use validation::validate_scoring;
