use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::ingest::{group_by_id, read_records, select_by_id};
use crate::record::OfficialRecord;
use crate::scoring::{score_official, ScoringModel, ScoringResult};

/// One scored official: the first input row (for identity and display) and
/// the result over all of its rows.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub record: OfficialRecord,
    pub result: ScoringResult,
}

/// Every official in a data file, scored and sorted by score descending.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub entries: Vec<ScoredEntry>,
    pub records: Vec<OfficialRecord>,
    pub warnings: Vec<String>,
}

impl Evaluation {
    pub fn find(&self, id: &str) -> Option<&ScoredEntry> {
        let id = id.trim();
        self.entries.iter().find(|e| e.record.id == id)
    }
}

/// Score the rows of one official. Returns None when no row carries `id`.
pub fn score_by_id(records: &[OfficialRecord], id: &str, model: &ScoringModel) -> Option<ScoredEntry> {
    let rows = select_by_id(records, id);
    let record = rows.first()?.clone();
    let result = score_official(rows, model);
    Some(ScoredEntry { record, result })
}

/// Score every official, grouping rows by identifier.
///
/// Sorted by score descending; ties keep first-seen order.
pub fn score_all(records: Vec<OfficialRecord>, model: &ScoringModel) -> Vec<ScoredEntry> {
    let mut entries: Vec<ScoredEntry> = group_by_id(records)
        .into_iter()
        .map(|(_, rows)| {
            let record = rows[0].clone();
            let result = score_official(rows, model);
            ScoredEntry { record, result }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Read a data file and score everyone in it.
///
/// Called from main.rs for the one-shot commands and from the dashboard on
/// reload.
pub fn load_and_score(path: &Path, config: &Config) -> Result<Evaluation> {
    let model = config.scoring_model();
    let report = read_records(path, &config.columns(), &model)?;

    let entries = score_all(report.records.clone(), &model);
    let vetoed = entries.iter().filter(|e| e.result.is_vetoed()).count();
    debug!(
        officials = entries.len(),
        rows = report.records.len(),
        vetoed,
        "scored data file"
    );

    Ok(Evaluation {
        entries,
        records: report.records,
        warnings: report.warnings,
    })
}
