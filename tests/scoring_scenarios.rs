use serc::evaluate::{score_all, score_by_id};
use serc::ingest::{read_records_from, ColumnConfig};
use serc::scoring::{
    aggregate, augment, derive_patrimonial_risk, ratio_score, ScoringModel, PATRIMONIAL_INDICATOR,
};
use serc::OfficialRecord;

fn model() -> ScoringModel {
    ScoringModel::default()
}

fn augmented(mut record: OfficialRecord) -> OfficialRecord {
    augment(&mut record, &model());
    record
}

#[test]
fn ratio_bands_are_closed_at_the_lower_bound() {
    let cases = [
        (10.0, 100.0),
        (9.999, 90.0),
        (5.0, 90.0),
        (3.0, 75.0),
        (1.5, 50.0),
        (1.49, 10.0),
    ];
    for (ratio, expected) in cases {
        assert_eq!(ratio_score(ratio), expected, "ratio {}", ratio);
    }
}

#[test]
fn missing_financials_score_zero_not_lowest_band() {
    let record = OfficialRecord::new("1");
    assert_eq!(derive_patrimonial_risk(&record), 0.0);

    let only_income = OfficialRecord::new("1").with_financials(Some(1000.0), None);
    assert_eq!(derive_patrimonial_risk(&only_income), 0.0);

    let tiny_ratio = OfficialRecord::new("1").with_financials(Some(1000.0), Some(1.0));
    assert_eq!(derive_patrimonial_risk(&tiny_ratio), 10.0);
}

#[test]
fn critical_indicator_forces_maximum_score() {
    let record = augmented(
        OfficialRecord::new("1")
            .with_indicator("DENUNCIAS_SCORE", 85.0)
            .with_indicator("TRANSFUGUISMO", 0.0),
    );
    let result = aggregate(Some(&record), &model());

    assert_eq!(result.score, 100.0);
    assert_eq!(result.vetoed_by.as_deref(), Some("DENUNCIAS_SCORE"));
}

#[test]
fn ethics_indicator_alone_triggers_veto() {
    let record = augmented(OfficialRecord::new("1").with_indicator("RIESGO_ETICO_SCORE", 85.0));
    let result = aggregate(Some(&record), &model());

    assert_eq!(result.score, 100.0);
    assert!(result.is_vetoed());
}

#[test]
fn non_critical_indicator_never_vetoes() {
    let record = augmented(OfficialRecord::new("1").with_indicator("TRANSFUGUISMO", 100.0));
    let result = aggregate(Some(&record), &model());

    assert!(!result.is_vetoed());
    assert_eq!(result.score, 10.0);
}

#[test]
fn single_indicator_weighted_sum() {
    let record = augmented(OfficialRecord::new("1").with_indicator("DENUNCIAS_SCORE", 60.0));
    let result = aggregate(Some(&record), &model());

    // 60 * 0.15, patrimonial contributes 0 without financial data
    assert_eq!(result.score, 9.0);
    assert_eq!(result.value_of(PATRIMONIAL_INDICATOR), Some(0.0));
}

#[test]
fn wealth_ratio_of_six_contributes_patrimonial_weight() {
    let record =
        augmented(OfficialRecord::new("1").with_financials(Some(10_000.0), Some(60_000.0)));
    let result = aggregate(Some(&record), &model());

    assert_eq!(result.value_of(PATRIMONIAL_INDICATOR), Some(90.0));
    assert!(!result.is_vetoed());
    assert_eq!(result.score, 22.5);
}

#[test]
fn empty_input_yields_empty_result() {
    let result = aggregate(None, &model());
    assert_eq!(result.score, 0.0);
    assert!(result.indicator_values.is_empty());
}

#[test]
fn aggregate_is_repeatable() {
    let record = augmented(
        OfficialRecord::new("1")
            .with_indicator("DENUNCIAS_SCORE", 33.3)
            .with_indicator("PRENSA_NEGATIVA_SCORE", 71.0)
            .with_financials(Some(2000.0), Some(7000.0)),
    );
    let first = aggregate(Some(&record), &model());
    let second = aggregate(Some(&record), &model());

    assert_eq!(first.score, second.score);
    assert_eq!(first.indicator_values, second.indicator_values);
}

#[test]
fn csv_file_scores_every_official() {
    let data = "\
POLÍTICO_ID,NOMBRE_COMPLETO,CARGO,INGRESOS_TOTAL,PATRIMONIO_TOTAL,DENUNCIAS_SCORE,RIESGO_ETICO_SCORE
101,Ana Torres,Alcaldesa,10000,60000,,
102,Luis Pérez,Regidor,,,60,
103,Rosa Díaz,Congresista,5000,1000,,90
";
    let report = read_records_from(data.as_bytes(), &ColumnConfig::default(), &model()).unwrap();
    assert!(report.warnings.is_empty());

    let entries = score_all(report.records.clone(), &model());
    let ranked: Vec<(&str, f64)> = entries
        .iter()
        .map(|e| (e.record.id.as_str(), e.result.score))
        .collect();
    assert_eq!(ranked, vec![("103", 100.0), ("101", 22.5), ("102", 9.0)]);

    let ana = score_by_id(&report.records, " 101 ", &model()).unwrap();
    assert_eq!(ana.record.name, "Ana Torres");
    assert!(score_by_id(&report.records, "999", &model()).is_none());
}
