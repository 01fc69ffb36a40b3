pub mod config;
pub mod evaluate;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod record;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;

pub use record::OfficialRecord;
pub use scoring::{aggregate, derive_patrimonial_risk, ScoringModel, ScoringResult};
