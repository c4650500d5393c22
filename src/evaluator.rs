//! Main evaluation orchestrator.
//!
//! A run classifies every retained prediction once, then builds one
//! precision-recall curve per category from that shared classification.

use crate::config::{EvalConfig, EvalType};
use crate::error::Result;
use crate::loader::{load_from_files, EvalData};
use crate::matching::{assign, Assignment};
use crate::metrics::ap::{calculate_map, interpolate, ApAr};
use crate::metrics::precision_recall::PrCurve;
use crate::report::{CategoryMetrics, EvaluationReport};
use crate::types::CategoryFilter;
use log::{debug, info};
use std::path::Path;

/// Precision-recall curve of the predictions passing `filter`.
///
/// Recall is measured against the ground-truth boxes passing the same filter.
pub fn build_curve(assignment: &Assignment, filter: CategoryFilter<'_>) -> PrCurve {
    PrCurve::from_outcomes(
        assignment.outcomes(filter),
        assignment.ground_truth_count(filter),
    )
}

/// Average precision and recall of the predictions passing `filter`.
///
/// A filter that selects no predictions yields `(0, 0)` without looking at
/// `eval_type`.
///
/// # Errors
///
/// Returns [`crate::EvalError::UnsupportedEvalType`] if `eval_type` is neither
/// `COCO` nor `VOC` and at least one prediction is selected.
pub fn evaluate_curve(
    assignment: &Assignment,
    filter: CategoryFilter<'_>,
    number_of_segments: usize,
    eval_type: &str,
) -> Result<ApAr> {
    if assignment.prediction_count(filter) == 0 {
        return Ok(ApAr::default());
    }

    let eval_type: EvalType = eval_type.parse()?;
    let curve = build_curve(assignment, filter);
    Ok(interpolate(&curve, number_of_segments, eval_type))
}

/// Evaluate loaded data and aggregate the per-category results.
///
/// Background categories get no row but still count in the mean's
/// denominator, which is the size of the whole label map.
///
/// # Example
///
/// ```
/// use detection_eval::{evaluate, load_from_strings, EvalConfig};
///
/// let gt = r#"{
///     "annotations": [{"id": 1, "image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10]}],
///     "categories": [{"id": "1", "name": "person"}]
/// }"#;
/// let predictions = r#"[
///     {"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": 0.9},
///     {"image_id": "a", "category_id": "1", "bbox": [50, 50, 5, 5], "score": 0.8}
/// ]"#;
///
/// let config = EvalConfig::default();
/// let data = load_from_strings(gt, predictions, &config).unwrap();
/// let report = evaluate(&data, &config).unwrap();
/// assert!((report.mean_ap - 1.0).abs() < 1e-10);
/// ```
pub fn evaluate(data: &EvalData, config: &EvalConfig) -> Result<EvaluationReport> {
    config.validate()?;

    let assignment = assign(&data.predictions, &data.ground_truth, config.min_overlap);
    info!(
        "classified {} predictions: {} true positives, {} false positives",
        assignment.len(),
        assignment.true_positives(),
        assignment.false_positives()
    );

    let mut rows = Vec::new();
    for category in data.categories.iter().filter(|c| !c.is_background()) {
        let filter = CategoryFilter::Category(&category.id);
        let result = evaluate_curve(
            &assignment,
            filter,
            config.number_of_segments,
            &config.eval_type,
        )?;
        debug!(
            "category {} ({}): AP {:.4}, AR {:.4}",
            category.id, category.name, result.ap, result.ar
        );

        rows.push(CategoryMetrics {
            category: category.clone(),
            ap: result.ap,
            ar: result.ar,
            predictions: assignment.prediction_count(filter),
            ground_truth: assignment.ground_truth_count(filter),
        });
    }

    let category_count = data.categories.len();
    let aps: Vec<f64> = rows.iter().map(|row| row.ap).collect();
    let ars: Vec<f64> = rows.iter().map(|row| row.ar).collect();
    let mean_ap = calculate_map(&aps, category_count);
    let mean_ar = calculate_map(&ars, category_count);

    let pooled = evaluate_curve(
        &assignment,
        CategoryFilter::All,
        config.number_of_segments,
        &config.eval_type,
    )?;

    info!(
        "mAP {:.4}, mAR {:.4} over {} categories (pooled AP {:.4}, AR {:.4})",
        mean_ap, mean_ar, category_count, pooled.ap, pooled.ar
    );

    Ok(EvaluationReport {
        eval_type: config.eval_type.clone(),
        categories: rows,
        mean_ap,
        mean_ar,
        pooled,
    })
}

/// Load both collections from files and evaluate them.
pub fn evaluate_files<P, Q>(
    ground_truth_path: P,
    predictions_path: Q,
    config: &EvalConfig,
) -> Result<EvaluationReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let data = load_from_files(ground_truth_path, predictions_path, config)?;
    evaluate(&data, config)
}
