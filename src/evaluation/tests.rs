use super::*;
use crate::benchmark::{BenchmarkTable, load_benchmark_bytes};
use crate::constants::ColumnNames;
use crate::error::ErrorKind;
use crate::table::{Table, TableError};
use std::path::Path;
use std::sync::Arc;

const EPSILON: f64 = 1e-12;

fn benchmark(csv: &str) -> Arc<BenchmarkTable> {
    Arc::new(
        load_benchmark_bytes(csv.as_bytes(), Path::new("target_data.csv"), &ColumnNames::default())
            .expect("benchmark should load"),
    )
}

fn scenario_benchmark() -> Arc<BenchmarkTable> {
    benchmark("slide_id,mIDH\nA,1\nB,0\nC,1\n")
}

fn evaluator(benchmark: Arc<BenchmarkTable>) -> Evaluator {
    Evaluator::new(benchmark, ColumnNames::default())
}

fn scored(evaluation: Evaluation) -> EvaluationReport {
    match evaluation {
        Evaluation::Scored(report) => report,
        other => panic!("expected scored evaluation, got {other:?}"),
    }
}

#[test]
fn test_join_drops_unmatched_and_keeps_submission_order() {
    let submission = Table::from_csv_bytes(b"slide_id,pred\nC,1\nD,0\nA,1\n").unwrap();

    let outcome = inner_join(&submission, &scenario_benchmark(), &ColumnNames::default()).unwrap();

    match outcome {
        JoinOutcome::Matched { pairs, diagnostics } => {
            let ids: Vec<&str> = pairs.iter().map(|p| p.identifier.as_str()).collect();
            assert_eq!(ids, ["C", "A"]);
            assert_eq!(pairs[0].row, 1);
            assert_eq!(pairs[1].row, 3);
            assert_eq!(pairs[1].true_label, "1");
            assert_eq!(
                diagnostics,
                JoinDiagnostics {
                    submission_rows: 3,
                    benchmark_rows: 3,
                    matched_rows: 2,
                    unmatched_submission_rows: 1,
                    unmatched_benchmark_identifiers: 1,
                }
            );
        }
        other => panic!("expected matched join, got {other:?}"),
    }
}

#[test]
fn test_join_duplicates_fan_out() {
    let submission = Table::from_csv_bytes(b"slide_id,pred\nA,1\nA,0\nB,0\n").unwrap();

    let outcome = inner_join(&submission, &scenario_benchmark(), &ColumnNames::default()).unwrap();

    let JoinOutcome::Matched { pairs, diagnostics } = outcome else {
        panic!("expected matched join");
    };
    let a_pairs: Vec<_> = pairs.iter().filter(|p| p.identifier == "A").collect();
    assert_eq!(a_pairs.len(), 2);
    assert_eq!(a_pairs[0].predicted_label, "1");
    assert_eq!(a_pairs[1].predicted_label, "0");
    assert_eq!(diagnostics.matched_rows, 3);
    assert_eq!(diagnostics.unmatched_benchmark_identifiers, 1);
}

#[test]
fn test_join_disjoint_is_no_overlap() {
    let submission = Table::from_csv_bytes(b"slide_id,pred\nX,1\nY,0\n").unwrap();

    let outcome = inner_join(&submission, &scenario_benchmark(), &ColumnNames::default()).unwrap();

    assert!(matches!(outcome, JoinOutcome::NoOverlap(_)));
    assert_eq!(outcome.diagnostics().unmatched_submission_rows, 2);
    assert_eq!(outcome.diagnostics().unmatched_benchmark_identifiers, 3);
}

#[test]
fn test_join_identifiers_match_exactly() {
    let submission = Table::from_csv_bytes(b"slide_id,pred\na,1\n").unwrap();
    let outcome = inner_join(&submission, &scenario_benchmark(), &ColumnNames::default()).unwrap();
    assert!(matches!(outcome, JoinOutcome::NoOverlap(_)));
}

#[test]
fn test_reference_scenario() {
    let evaluation = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\nA,1\nB,1\nC,1\nD,0\n")
        .unwrap();
    let report = scored(evaluation);

    assert_eq!(report.n_matched, 3);
    let matrix = report.metrics.confusion_matrix.value().unwrap();
    assert_eq!(matrix.true_negatives(), 0);
    assert_eq!(matrix.false_positives(), 1);
    assert_eq!(matrix.false_negatives(), 0);
    assert_eq!(matrix.true_positives(), 2);

    let balanced = *report.metrics.balanced_accuracy.value().unwrap();
    let f1 = *report.metrics.f1_score.value().unwrap();
    assert!((balanced - 0.5).abs() < EPSILON);
    assert!((f1 - 0.8).abs() < EPSILON);

    assert!(report.warnings.is_empty());
    assert_eq!(report.join.unmatched_submission_rows, 1);
    assert_eq!(report.join.unmatched_benchmark_identifiers, 0);
}

#[test]
fn test_matched_count_equals_matrix_total() {
    let cases: [&[u8]; 3] = [
        b"slide_id,pred\nA,1\nB,0\n",
        b"slide_id,pred\nA,1\nA,1\nB,0\nC,0\nZ,1\n",
        b"pred,slide_id\n0,C\n",
    ];
    let evaluator = evaluator(scenario_benchmark());

    for csv in cases {
        let report = scored(evaluator.evaluate_bytes(csv).unwrap());
        let matrix = report.metrics.confusion_matrix.value().unwrap();
        assert_eq!(matrix.total(), report.n_matched as u64);
        assert_eq!(report.n_matched, report.join.matched_rows);
        assert!(report.n_matched <= report.join.submission_rows);
    }
}

#[test]
fn test_unique_submission_matches_at_most_min_len() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,1\nB,0\nC,1\nD,1\nE,0\n")
            .unwrap(),
    );
    assert!(report.n_matched <= report.join.submission_rows.min(report.join.benchmark_rows));
}

#[test]
fn test_duplicate_identifiers_produce_two_pairs() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,1\nA,0\n")
            .unwrap(),
    );

    assert_eq!(report.n_matched, 2);
    let matrix = report.metrics.confusion_matrix.value().unwrap();
    assert_eq!(matrix.true_positives(), 1);
    assert_eq!(matrix.false_negatives(), 1);
}

#[test]
fn test_disjoint_submission_reports_no_overlap() {
    let evaluation = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\nX,1\nY,0\n")
        .unwrap();

    assert!(evaluation.is_no_overlap());
    assert!(evaluation.report().is_none());
}

#[test]
fn test_header_only_submission_reports_no_overlap() {
    let evaluation = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\n")
        .unwrap();
    assert!(evaluation.is_no_overlap());
}

#[test]
fn test_missing_prediction_column() {
    let err = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,prediction\nA,1\n")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingColumns);
    match err {
        EvaluationError::Submission(TableError::MissingColumns { missing }) => {
            assert_eq!(missing, ["pred"])
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn test_missing_both_columns() {
    let err = evaluator(scenario_benchmark())
        .evaluate_bytes(b"id,score\nA,1\n")
        .unwrap_err();

    match err {
        EvaluationError::Submission(TableError::MissingColumns { missing }) => {
            assert_eq!(missing, ["pred", "slide_id"])
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn test_repeated_extra_submission_columns_are_ignored() {
    let evaluator = evaluator(scenario_benchmark());

    let report = scored(
        evaluator
            .evaluate_bytes(b"slide_id,pred,note,note\nA,1,x,y\nB,1,x,y\nC,1,x,y\n")
            .unwrap(),
    );
    assert_eq!(report.n_matched, 3);
    assert_eq!(report.metrics.balanced_accuracy.value(), Some(&0.5));

    let report = scored(
        evaluator
            .evaluate_bytes(b"slide_id,pred,,\nA,1,,\nB,0,,\n")
            .unwrap(),
    );
    assert_eq!(report.n_matched, 2);
}

#[test]
fn test_repeated_prediction_column_is_parse_error() {
    let err = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred,pred\nA,1,0\n")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn test_malformed_submission() {
    let err = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\nA,1,1\n")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn test_non_integer_prediction_aborts() {
    let err = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\nA,1\nB,0.7\n")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CoercionError);
    assert!(err.to_string().contains("0.7"));
}

#[test]
fn test_non_integer_value_in_unmatched_row_is_ignored() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,1\nZ,oops\n")
            .unwrap(),
    );
    assert_eq!(report.n_matched, 1);
}

#[test]
fn test_non_integer_truth_aborts() {
    let err = evaluator(benchmark("slide_id,mIDH\nA,mutant\nB,0\n"))
        .evaluate_bytes(b"slide_id,pred\nA,1\nB,0\n")
        .unwrap_err();

    match err {
        EvaluationError::Coercion(err) => assert_eq!(err.column, "mIDH"),
        other => panic!("expected coercion error, got {other:?}"),
    }
}

#[test]
fn test_out_of_domain_predictions_warn_but_score() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,2\nB,0\n")
            .unwrap(),
    );

    assert_eq!(
        report.warnings,
        vec![EvaluationWarning::NonBinaryPredictions {
            column: "pred".to_string(),
            count: 1,
        }]
    );
    assert_eq!(report.n_matched, 2);
    assert!(report.metrics.f1_score.error().is_some());
}

#[test]
fn test_single_class_truth_keeps_other_metrics() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,1\nC,0\n")
            .unwrap(),
    );

    assert!(report.metrics.confusion_matrix.value().is_some());
    assert_eq!(
        report.metrics.balanced_accuracy.error(),
        Some(&MetricError::MissingClass { label: 0 })
    );
    let f1 = *report.metrics.f1_score.value().unwrap();
    assert!((f1 - 2.0 / 3.0).abs() < EPSILON);
}

#[test]
fn test_evaluation_is_deterministic() {
    let evaluator = evaluator(scenario_benchmark());
    let csv = b"slide_id,pred,score\nC,1,0.9\nA,0,0.2\nB,1,0.6\nA,1,0.7\n";

    let first = serde_json::to_string(&evaluator.evaluate_bytes(csv).unwrap()).unwrap();
    let second = serde_json::to_string(&evaluator.evaluate_bytes(csv).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_evaluate_table_has_no_submission_digest() {
    let evaluator = evaluator(scenario_benchmark());
    let table = Table::from_csv_bytes(b"slide_id,pred\nA,1\nB,0\n").unwrap();

    let report = scored(evaluator.evaluate_table(&table).unwrap());
    assert!(report.submission_digest.is_none());

    let report = scored(evaluator.evaluate_bytes(b"slide_id,pred\nA,1\nB,0\n").unwrap());
    assert_eq!(report.submission_digest.as_deref().map(str::len), Some(64));
    assert_eq!(report.benchmark_digest, evaluator.benchmark().digest());
}

#[test]
fn test_evaluate_missing_submission_path() {
    let err = evaluator(scenario_benchmark())
        .evaluate_path(Path::new("/nonexistent/submission.csv"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn test_scored_serialization_shape() {
    let evaluation = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\nA,1\nB,1\nC,1\nD,0\n")
        .unwrap();
    let json = serde_json::to_value(&evaluation).unwrap();

    assert_eq!(json["status"], "scored");
    assert_eq!(json["n_matched"], 3);
    assert_eq!(json["confusion_matrix"]["value"]["false_positives"], 1);
    assert_eq!(json["balanced_accuracy"]["value"], 0.5);
    assert_eq!(json["join"]["unmatched_submission_rows"], 1);
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_no_overlap_serialization_shape() {
    let evaluation = evaluator(scenario_benchmark())
        .evaluate_bytes(b"slide_id,pred\nX,1\n")
        .unwrap();
    let json = serde_json::to_value(&evaluation).unwrap();

    assert_eq!(json["status"], "no_overlap");
    assert_eq!(json["join"]["submission_rows"], 1);
}

#[test]
fn test_report_display() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,1\nB,1\nC,1\nD,0\n")
            .unwrap(),
    );
    let text = report.to_string();

    assert!(text.contains("Matched rows: 3"));
    assert!(text.contains("Predicted 0"));
    assert!(text.contains("Actual 1"));
    assert!(text.contains("True Positives (TP): 2"));
    assert!(text.contains("False Positives (FP): 1"));
    assert!(text.contains("Balanced Accuracy: 0.5000"));
    assert!(text.contains("F1 Score: 0.8000"));
}

#[test]
fn test_report_display_shows_metric_errors_and_warnings() {
    let report = scored(
        evaluator(scenario_benchmark())
            .evaluate_bytes(b"slide_id,pred\nA,3\nC,1\n")
            .unwrap(),
    );
    let text = report.to_string();

    assert!(text.contains("Error calculating Balanced Accuracy"));
    assert!(text.contains("Error calculating F1 Score"));
    assert!(text.contains("Warning: 'pred' column contains values other than 0 or 1"));
}
