use super::config::ScoringModel;
use super::financial::augment;
use crate::record::OfficialRecord;
use serde::Serialize;
use tracing::debug;

/// Score forced by the veto
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorContribution {
    pub name: String,
    pub value: Option<f64>, // None when absent from the record
    pub weight: f64,
    pub contribution: f64, // value * weight, zero when absent
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    /// Final score in [0, 100], two decimals
    pub score: f64,
    /// Values used in aggregation, in indicator order
    pub indicator_values: Vec<IndicatorValue>,
    pub contributions: Vec<IndicatorContribution>,
    /// Mean of the row weighted sums; diagnostic when vetoed
    pub weighted_sum: f64,
    /// First critical indicator at or above the threshold
    pub vetoed_by: Option<String>,
    pub rows: usize,
}

impl ScoringResult {
    /// Result for an empty input
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            indicator_values: Vec::new(),
            contributions: Vec::new(),
            weighted_sum: 0.0,
            vetoed_by: None,
            rows: 0,
        }
    }

    pub fn is_vetoed(&self) -> bool {
        self.vetoed_by.is_some()
    }

    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.indicator_values
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value)
    }
}

/// Return the first critical indicator whose value reaches the veto threshold.
///
/// Critical indicators are checked in model order; absent and non-finite
/// values never match.
pub fn check_veto(record: &OfficialRecord, model: &ScoringModel) -> Option<String> {
    model
        .critical()
        .iter()
        .find(|name| {
            finite_indicator(record, name).is_some_and(|value| value >= model.veto_threshold())
        })
        .cloned()
}

/// Weighted sum of one record plus the per-indicator breakdown.
///
/// Absent indicators are skipped without renormalizing the remaining
/// weights. Non-finite values count as absent. The patrimonial indicator
/// always takes part, as zero if the record was never augmented.
pub fn weighted_sum(record: &OfficialRecord, model: &ScoringModel) -> (f64, Vec<IndicatorContribution>) {
    let mut sum = 0.0;
    let mut contributions = Vec::with_capacity(model.indicators().len());

    for indicator in model.indicators() {
        let value = match finite_indicator(record, &indicator.name) {
            Some(v) => Some(v),
            None if indicator.name == model.patrimonial_indicator() => Some(0.0),
            None => None,
        };
        let contribution = value.map(|v| v * indicator.weight).unwrap_or(0.0);
        sum += contribution;

        contributions.push(IndicatorContribution {
            name: indicator.name.clone(),
            value,
            weight: indicator.weight,
            contribution,
            critical: model.is_critical(&indicator.name),
        });
    }

    (sum, contributions)
}

/// Aggregate a single augmented record. `None` yields the empty result.
pub fn aggregate(record: Option<&OfficialRecord>, model: &ScoringModel) -> ScoringResult {
    match record {
        Some(r) => aggregate_rows(std::slice::from_ref(r), model),
        None => ScoringResult::empty(),
    }
}

/// Aggregate every row recorded for one official.
///
/// The veto and the displayed values come from the first row. Without a veto
/// the score is the mean of all row weighted sums.
pub fn aggregate_rows(rows: &[OfficialRecord], model: &ScoringModel) -> ScoringResult {
    let Some(first) = rows.first() else {
        return ScoringResult::empty();
    };

    let vetoed_by = check_veto(first, model);
    let (_, contributions) = weighted_sum(first, model);
    let mean = rows.iter().map(|r| weighted_sum(r, model).0).sum::<f64>() / rows.len() as f64;

    let score = match &vetoed_by {
        Some(name) => {
            debug!(official = %first.id, indicator = %name, "veto activated");
            MAX_SCORE
        }
        None => round2(mean).clamp(0.0, MAX_SCORE),
    };

    let indicator_values = contributions
        .iter()
        .filter_map(|c| {
            c.value.map(|value| IndicatorValue {
                name: c.name.clone(),
                value,
            })
        })
        .collect();

    ScoringResult {
        score,
        indicator_values,
        contributions,
        weighted_sum: mean,
        vetoed_by,
        rows: rows.len(),
    }
}

/// Run the full pipeline on the rows of one official: derive the patrimonial
/// score for each row, then aggregate.
pub fn score_official(mut rows: Vec<OfficialRecord>, model: &ScoringModel) -> ScoringResult {
    for row in &mut rows {
        augment(row, model);
    }
    aggregate_rows(&rows, model)
}

fn finite_indicator(record: &OfficialRecord, name: &str) -> Option<f64> {
    record.indicator(name).filter(|v| v.is_finite())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
