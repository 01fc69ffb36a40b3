use super::config::ScoringModel;
use crate::record::OfficialRecord;

/// Score when either financial field is missing
pub const NO_DATA_SCORE: f64 = 0.0;

/// Score when the ratio falls below every band
pub const LOW_RATIO_SCORE: f64 = 10.0;

/// (minimum ratio, score), checked top to bottom
const RATIO_BANDS: [(f64, f64); 4] = [(10.0, 100.0), (5.0, 90.0), (3.0, 75.0), (1.5, 50.0)];

/// Net worth divided by income. Zero when income is not positive.
pub fn wealth_ratio(income: f64, net_worth: f64) -> f64 {
    if income > 0.0 {
        net_worth / income
    } else {
        0.0
    }
}

/// Map a wealth ratio to its band score. Lower bounds are inclusive.
pub fn ratio_score(ratio: f64) -> f64 {
    RATIO_BANDS
        .iter()
        .find(|(min, _)| ratio >= *min)
        .map(|(_, score)| *score)
        .unwrap_or(LOW_RATIO_SCORE)
}

/// Patrimonial risk for a record, or [`NO_DATA_SCORE`] without both financial fields.
pub fn derive_patrimonial_risk(record: &OfficialRecord) -> f64 {
    match (record.income, record.net_worth) {
        (Some(income), Some(net_worth)) => ratio_score(wealth_ratio(income, net_worth)),
        _ => NO_DATA_SCORE,
    }
}

/// Store the derived patrimonial score on the record and return it.
///
/// Overwrites any value the source may have carried under the same name.
pub fn augment(record: &mut OfficialRecord, model: &ScoringModel) -> f64 {
    let score = derive_patrimonial_risk(record);
    record.set_indicator(model.patrimonial_indicator(), score);
    score
}
