//! JSON loading for the ground-truth and prediction collections.

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::stats::LoadStats;
use crate::threshold::filter_by_min_prob;
use crate::types::{Category, GroundTruth, GroundTruthBox, Prediction};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const GROUND_TRUTH: &str = "ground truth";
const PREDICTIONS: &str = "predictions";

/// Normalized input tables of one evaluation run.
#[derive(Debug, Clone)]
pub struct EvalData {
    /// Ground-truth boxes in load order.
    pub ground_truth: Vec<GroundTruthBox>,
    /// Label map in load order; this is the report row order.
    pub categories: Vec<Category>,
    /// Predictions with `score > min_prob`, in load order.
    pub predictions: Vec<Prediction>,
    pub stats: LoadStats,
}

impl EvalData {
    /// Build the tables from already-parsed collections, dropping predictions
    /// with `score <= config.min_prob`.
    ///
    /// The whole configuration is validated first, so a bad `min_overlap` or
    /// segment count is reported here rather than halfway through an evaluation.
    pub fn new(ground_truth: GroundTruth, predictions: Vec<Prediction>, config: &EvalConfig) -> Result<Self> {
        config.validate()?;

        let GroundTruth {
            annotations,
            categories,
        } = ground_truth;

        let total_predictions = predictions.len();
        let predictions = filter_by_min_prob(predictions, config.min_prob)?;

        let stats = LoadStats {
            total_predictions,
            filtered_low_confidence: total_predictions - predictions.len(),
            ground_truth_boxes: annotations.len(),
            categories: categories.len(),
        };
        stats.log_summary();

        Ok(Self {
            ground_truth: annotations,
            categories,
            predictions,
            stats,
        })
    }
}

/// Load both collections from JSON files.
///
/// # Errors
///
/// Returns [`EvalError::InvalidConfig`] if `config` is out of range, and
/// [`EvalError::DataLoad`] naming the offending file if either file cannot be
/// read or does not have the expected structure.
///
/// # Example
///
/// ```no_run
/// use detection_eval::loader::load_from_files;
/// use detection_eval::EvalConfig;
///
/// let data = load_from_files("gt.json", "predictions.json", &EvalConfig::default()).unwrap();
/// println!("Loaded {} predictions", data.predictions.len());
/// ```
pub fn load_from_files<P, Q>(
    ground_truth_path: P,
    predictions_path: Q,
    config: &EvalConfig,
) -> Result<EvalData>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let ground_truth = load_ground_truth_from_file(ground_truth_path)?;
    let predictions = load_predictions_from_file(predictions_path)?;
    EvalData::new(ground_truth, predictions, config)
}

/// Load both collections from JSON strings.
///
/// # Example
///
/// ```
/// use detection_eval::loader::load_from_strings;
/// use detection_eval::EvalConfig;
///
/// let gt = r#"{
///     "annotations": [{"id": 1, "image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10]}],
///     "categories": [{"id": "1", "name": "person"}]
/// }"#;
/// let predictions = r#"[{"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": 0.9}]"#;
///
/// let data = load_from_strings(gt, predictions, &EvalConfig::default()).unwrap();
/// assert_eq!(data.ground_truth.len(), 1);
/// assert_eq!(data.predictions.len(), 1);
/// ```
pub fn load_from_strings(
    ground_truth_json: &str,
    predictions_json: &str,
    config: &EvalConfig,
) -> Result<EvalData> {
    let ground_truth = load_ground_truth_from_string(ground_truth_json)?;
    let predictions = load_predictions_from_string(predictions_json)?;
    EvalData::new(ground_truth, predictions, config)
}

/// Parse a ground-truth document `{"annotations": [...], "categories": [...]}`.
pub fn load_ground_truth_from_string(json_str: &str) -> Result<GroundTruth> {
    parse_str(json_str, GROUND_TRUTH)
}

/// Parse a ground-truth document from a file.
pub fn load_ground_truth_from_file<P: AsRef<Path>>(path: P) -> Result<GroundTruth> {
    parse_file(path.as_ref())
}

/// Parse a flat prediction list `[{"image_id", "category_id", "bbox", "score"}, ...]`.
pub fn load_predictions_from_string(json_str: &str) -> Result<Vec<Prediction>> {
    parse_str(json_str, PREDICTIONS)
}

/// Parse a prediction list from a file.
pub fn load_predictions_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Prediction>> {
    parse_file(path.as_ref())
}

fn parse_str<T: DeserializeOwned>(json_str: &str, collection: &str) -> Result<T> {
    serde_json::from_str(json_str).map_err(|err| EvalError::data_load(collection, err))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let collection = path.display().to_string();
    let file = File::open(path).map_err(|err| EvalError::data_load(&collection, err))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|err| EvalError::data_load(&collection, err))
}
