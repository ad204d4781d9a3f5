//! Stack-up pipeline tests - rows through chain, calculator and report

mod common;

use common::{row, two_part_rows};
use tolchain::core::{
    analyze, compute, report, AnalysisConfig, AnalysisError, CellValue, ChainError, Row, Target,
    Verdict,
};
use tolchain::entities::{build_chain, Direction};

// ============================================================================
// Chain Model
// ============================================================================

#[test]
fn test_non_numeric_nominal_is_validation_error() {
    let rows = vec![Row::new()
        .with("name", "A")
        .with("nominal", "abc")
        .with("plus_tolerance", 0.1)
        .with("minus_tolerance", 0.1)];

    match build_chain(&rows) {
        Err(ChainError::Validation { row, field, .. }) => {
            assert_eq!(row, 0);
            assert_eq!(field, "nominal");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_negative_tolerance_is_validation_error() {
    let rows = vec![
        row("A", 10.0, 0.1, "add"),
        Row::new()
            .with("name", "B")
            .with("nominal", 5.0)
            .with("plus_tolerance", -1)
            .with("minus_tolerance", 0.1),
    ];

    assert!(matches!(
        build_chain(&rows),
        Err(ChainError::Validation { row: 1, ref field, .. }) if field == "plus_tolerance"
    ));
}

#[test]
fn test_empty_rows_is_empty_chain_error() {
    assert_eq!(build_chain(&[]), Err(ChainError::EmptyChain));
}

#[test]
fn test_direction_words_match_numeric_signs() {
    let words = build_chain(&[row("A", 10.0, 0.1, "add"), row("B", 5.0, 0.05, "Subtract")])
        .unwrap();
    let numbers = build_chain(&[
        row("A", 10.0, 0.1, "add").with("direction", 1),
        row("B", 5.0, 0.05, "add").with("direction", -1),
    ])
    .unwrap();

    assert_eq!(words, numbers);
    assert_eq!(compute(&words).unwrap(), compute(&numbers).unwrap());
    assert_eq!(words.contributors()[1].direction, Direction::Negative);
}

#[test]
fn test_missing_direction_defaults_to_add() {
    let rows = vec![Row::new()
        .with("name", "A")
        .with("nominal", 2.0)
        .with("plus_tolerance", 0.1)
        .with("minus_tolerance", 0.1)];
    let chain = build_chain(&rows).unwrap();
    assert_eq!(chain.contributors()[0].direction, Direction::Positive);
}

#[test]
fn test_columns_from_spreadsheet_headers() {
    let rows = vec![Row::new()
        .with("Name", "Bracket")
        .with(" Nominal ", "12.00")
        .with("PLUS_TOLERANCE", "0.05")
        .with("Minus_Tolerance", 0.02)
        .with("Direction", CellValue::Empty)];
    let chain = build_chain(&rows).unwrap();
    let c = &chain.contributors()[0];
    assert_eq!(c.nominal, 12.0);
    assert_eq!(c.plus_tolerance, 0.05);
    assert_eq!(c.minus_tolerance, 0.02);
    assert_eq!(c.direction, Direction::Positive);
}

// ============================================================================
// Stack-up Calculator
// ============================================================================

#[test]
fn test_two_part_scenario() {
    let chain = build_chain(&two_part_rows()).unwrap();
    let r = compute(&chain).unwrap();

    assert!((r.nominal_resultant - 5.0).abs() < 1e-12);
    assert!((r.worst_case_plus - 0.15).abs() < 1e-12);
    assert!((r.worst_case_minus - 0.15).abs() < 1e-12);
    assert!((r.statistical_plus - 0.1118).abs() < 1e-4);
    assert!((r.statistical_minus - 0.1118).abs() < 1e-4);
}

#[test]
fn test_single_contributor_bounds_collapse() {
    let chain = build_chain(&[row("Only", 7.0, 0.25, "add")]).unwrap();
    let r = compute(&chain).unwrap();
    assert_eq!(r.worst_case_plus, 0.25);
    // 0.25 is exact in binary, so the square root is too
    assert_eq!(r.statistical_plus, 0.25);
    assert_eq!(r.nominal_resultant, 7.0);
}

#[test]
fn test_compute_twice_is_bit_identical() {
    let chain = build_chain(&[
        row("A", 10.3, 0.013, "add"),
        row("B", 4.7, 0.071, "subtract"),
        row("C", 1.1, 0.002, "add"),
    ])
    .unwrap();
    let a = compute(&chain).unwrap();
    let b = compute(&chain).unwrap();
    for (x, y) in [
        (a.nominal_resultant, b.nominal_resultant),
        (a.worst_case_plus, b.worst_case_plus),
        (a.worst_case_minus, b.worst_case_minus),
        (a.statistical_plus, b.statistical_plus),
        (a.statistical_minus, b.statistical_minus),
    ] {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

// ============================================================================
// Report Formatter
// ============================================================================

#[test]
fn test_report_intervals_and_count() {
    let chain = build_chain(&two_part_rows()).unwrap();
    let result = compute(&chain).unwrap();
    let report = report::format(&chain, &result);

    assert_eq!(report.contributor_count, 2);
    assert!((report.worst_case.min - 4.85).abs() < 1e-12);
    assert!((report.worst_case.max - 5.15).abs() < 1e-12);
    assert!((report.statistical.min - 4.8882).abs() < 1e-4);
    assert!((report.statistical.max - 5.1118).abs() < 1e-4);
}

#[test]
fn test_report_yaml_is_a_mapping() {
    let report = analyze(&two_part_rows(), &AnalysisConfig::default()).unwrap();
    let yaml = serde_yml::to_string(&report).unwrap();
    let value: serde_yml::Value = serde_yml::from_str(&yaml).unwrap();
    assert_eq!(value["contributor_count"].as_u64(), Some(2));
    assert!(value["worst_case"]["max"].as_f64().is_some());
    assert_eq!(value["contributors"][1]["name"].as_str(), Some("B"));
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_analyze_with_target_verdicts() {
    let config = AnalysisConfig {
        target: Some(Target::new(4.82, 5.18)),
        ..Default::default()
    };
    let report = analyze(&two_part_rows(), &config).unwrap();
    let target = report.target.expect("target summary");
    // Worst-case margin 0.03 is under 10% of the 0.36 band
    assert_eq!(target.worst_case.verdict, Verdict::Marginal);
    assert_eq!(target.statistical.verdict, Verdict::Pass);
}

#[test]
fn test_analyze_reports_first_error_only() {
    let rows = vec![
        row("A", 10.0, 0.1, "sideways"),
        Row::new().with("name", "B").with("nominal", "abc"),
    ];
    match analyze(&rows, &AnalysisConfig::default()) {
        Err(AnalysisError::Chain(ChainError::Validation { row, field, .. })) => {
            assert_eq!(row, 0);
            assert_eq!(field, "direction");
        }
        other => panic!("expected direction error, got {:?}", other),
    }
}
