//! Confidence score thresholding utilities.

use crate::error::{EvalError, Result};
use crate::types::Prediction;

/// Drop predictions whose score does not exceed `min_prob`.
///
/// The comparison is strict: a prediction scored exactly `min_prob` is dropped.
/// Load order of the retained predictions is preserved.
///
/// # Errors
///
/// Returns an error if `min_prob` is not in the valid range [0.0, 1.0].
///
/// # Example
///
/// ```
/// use detection_eval::threshold::filter_by_min_prob;
/// use detection_eval::types::{BoundingBox, Prediction};
///
/// let predictions = vec![
///     Prediction::new("a", "1", BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.9),
///     Prediction::new("a", "1", BoundingBox::new(5.0, 5.0, 10.0, 10.0), 0.01),
/// ];
///
/// let kept = filter_by_min_prob(predictions, 0.01).unwrap();
/// assert_eq!(kept.len(), 1);
/// ```
pub fn filter_by_min_prob(predictions: Vec<Prediction>, min_prob: f64) -> Result<Vec<Prediction>> {
    validate_threshold(min_prob)?;

    Ok(predictions
        .into_iter()
        .filter(|prediction| prediction.score > min_prob)
        .collect())
}

/// Validate that a threshold is in the valid range [0.0, 1.0].
fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(EvalError::InvalidConfig(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}
