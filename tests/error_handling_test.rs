//! Error handling and validation tests.

use detection_eval::error::EvalError;
use detection_eval::evaluator::{evaluate, evaluate_curve, evaluate_files};
use detection_eval::loader::{
    load_from_files, load_from_strings, load_ground_truth_from_string,
    load_predictions_from_string,
};
use detection_eval::matching::assign;
use detection_eval::types::{BoundingBox, CategoryFilter, GroundTruthBox, Prediction};
use detection_eval::EvalConfig;
use std::fs;
use std::path::PathBuf;

const GT_JSON: &str = r#"{
    "annotations": [{"id": 1, "image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10]}],
    "categories": [{"id": "1", "name": "person"}]
}"#;

const PR_JSON: &str = r#"[{"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": 0.9}]"#;

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("detection-eval-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// LOADER ERROR TESTS
// ============================================================================

#[test]
fn test_invalid_json() {
    let result = load_ground_truth_from_string("{ invalid json");
    assert!(matches!(result, Err(EvalError::DataLoad { .. })), "Should fail on invalid JSON");
}

#[test]
fn test_missing_annotations_key() {
    let result = load_ground_truth_from_string(r#"{"categories": []}"#);
    match result {
        Err(EvalError::DataLoad { collection, reason }) => {
            assert_eq!(collection, "ground truth");
            assert!(reason.contains("annotations"));
        }
        other => panic!("expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_predictions_must_be_a_list() {
    let result = load_predictions_from_string(GT_JSON);
    assert!(matches!(
        result,
        Err(EvalError::DataLoad { ref collection, .. }) if collection == "predictions"
    ));
}

#[test]
fn test_wrong_field_type() {
    let result = load_predictions_from_string(
        r#"[{"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": "high"}]"#,
    );
    assert!(result.is_err(), "Should fail with a non-numeric score");

    let result = load_predictions_from_string(
        r#"[{"image_id": ["a"], "category_id": "1", "bbox": [0, 0, 10, 10], "score": 0.5}]"#,
    );
    assert!(result.is_err(), "Should fail with a non-scalar image id");
}

#[test]
fn test_bbox_with_wrong_length() {
    let gt = r#"{
        "annotations": [{"id": 1, "image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10, 4]}],
        "categories": []
    }"#;
    let result = load_ground_truth_from_string(gt);
    match result {
        Err(EvalError::DataLoad { reason, .. }) => assert!(reason.contains("4 values")),
        other => panic!("expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_bad_predictions_abort_whole_load() {
    let result = load_from_strings(GT_JSON, "[{}]", &EvalConfig::default());
    assert!(result.is_err(), "Loading must not return partial data");
}

#[test]
fn test_missing_file() {
    let result = load_from_files(
        "/path/that/does/not/exist.json",
        "/also/missing.json",
        &EvalConfig::default(),
    );
    match result {
        Err(EvalError::DataLoad { collection, .. }) => {
            assert_eq!(collection, "/path/that/does/not/exist.json");
        }
        other => panic!("expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_malformed_prediction_file_is_named() {
    let gt_path = write_fixture("gt_ok.json", GT_JSON);
    let pr_path = write_fixture("pr_broken.json", "[{\"image_id\": ");

    let result = load_from_files(&gt_path, &pr_path, &EvalConfig::default());
    match result {
        Err(EvalError::DataLoad { collection, .. }) => {
            assert!(collection.ends_with("pr_broken.json"), "got {}", collection);
        }
        other => panic!("expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_evaluate_files_roundtrip() {
    let gt_path = write_fixture("gt_roundtrip.json", GT_JSON);
    let pr_path = write_fixture("pr_roundtrip.json", PR_JSON);

    let report = evaluate_files(&gt_path, &pr_path, &EvalConfig::default()).unwrap();
    assert!((report.mean_ap - 1.0).abs() < 1e-10);
}

// ============================================================================
// CONFIGURATION ERROR TESTS
// ============================================================================

#[test]
fn test_min_prob_out_of_range() {
    let config = EvalConfig::default().with_min_prob(1.5);
    let result = load_from_strings(GT_JSON, PR_JSON, &config);
    assert!(matches!(result, Err(EvalError::InvalidConfig(_))));
}

#[test]
fn test_invalid_config_fails_file_load() {
    let gt_path = write_fixture("gt_bad_config.json", GT_JSON);
    let pr_path = write_fixture("pr_bad_config.json", PR_JSON);

    let config = EvalConfig::default().with_min_overlap(1.5);
    let result = load_from_files(&gt_path, &pr_path, &config);
    assert!(matches!(result, Err(EvalError::InvalidConfig(_))));

    let result = evaluate_files(&gt_path, &pr_path, &config);
    assert!(matches!(result, Err(EvalError::InvalidConfig(_))));
}

#[test]
fn test_score_out_of_range_aborts_load() {
    let predictions = r#"[
        {"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": 0.9},
        {"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": -0.2}
    ]"#;
    let result = load_from_strings(GT_JSON, predictions, &EvalConfig::default());
    match result {
        Err(EvalError::DataLoad { collection, reason }) => {
            assert_eq!(collection, "predictions");
            assert!(reason.contains("-0.2"), "unexpected reason: {}", reason);
        }
        other => panic!("expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_min_overlap_out_of_range() {
    let data = load_from_strings(GT_JSON, PR_JSON, &EvalConfig::default()).unwrap();
    let config = EvalConfig::default().with_min_overlap(-0.5);
    assert!(matches!(evaluate(&data, &config), Err(EvalError::InvalidConfig(_))));
}

#[test]
fn test_config_file_errors() {
    let path = write_fixture("config_bad.json", r#"{"min_overlap": "half"}"#);
    match EvalConfig::from_file(&path) {
        Err(EvalError::DataLoad { collection, .. }) => assert!(collection.ends_with("config_bad.json")),
        other => panic!("expected DataLoad, got {:?}", other),
    }

    let path = write_fixture("config_ok.json", r#"{"min_overlap": 0.7, "eval_type": "VOC"}"#);
    let config = EvalConfig::from_file(&path).unwrap();
    assert_eq!(config.min_overlap, 0.7);
    assert_eq!(config.eval_type, "VOC");
    assert_eq!(config.min_prob, 0.01);
}

// ============================================================================
// EVAL TYPE TESTS
// ============================================================================

#[test]
fn test_unsupported_eval_type_for_non_empty_category() {
    let ground_truth = vec![GroundTruthBox::new(
        "1",
        "a",
        "1",
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
    )];
    let predictions = vec![Prediction::new(
        "a",
        "2",
        BoundingBox::new(100.0, 100.0, 10.0, 10.0),
        0.4,
    )];
    let assignment = assign(&predictions, &ground_truth, 0.5);

    let result = evaluate_curve(&assignment, CategoryFilter::Category("2"), 10, "XYZ");
    match result {
        Err(EvalError::UnsupportedEvalType(name)) => assert_eq!(name, "XYZ"),
        other => panic!("expected UnsupportedEvalType, got {:?}", other),
    }

    let result = evaluate_curve(&assignment, CategoryFilter::All, 10, "XYZ");
    assert!(matches!(result, Err(EvalError::UnsupportedEvalType(_))));
}

#[test]
fn test_eval_type_checked_after_loading() {
    let config = EvalConfig::default().with_eval_type("XYZ");
    let data = load_from_strings(GT_JSON, PR_JSON, &config);
    assert!(data.is_ok(), "eval_type must not be checked at load time");

    let result = evaluate(&data.unwrap(), &config);
    assert!(matches!(result, Err(EvalError::UnsupportedEvalType(_))));
}

#[test]
fn test_error_messages() {
    let err = EvalError::UnsupportedEvalType("XYZ".to_string());
    assert_eq!(err.to_string(), "There is no such type as XYZ. Known types: COCO, VOC");

    let err = load_ground_truth_from_string("nope").unwrap_err();
    assert!(err.to_string().starts_with("Could not load ground truth:"));
}
