pub mod band;
pub mod formatter;

pub use band::{validate_bands, BandConfig, RiskBand};
pub use formatter::{
    format_breakdown, format_json, format_score, format_scored_table, format_tsv,
    indicator_label, should_use_colors, ScoredOfficial, DISCLAIMER,
};
