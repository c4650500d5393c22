//! Statistics tracking for input loading.
//!
//! Counts what the loader saw and what it kept, so a run can report how many
//! predictions were dropped by the probability threshold.

use log::info;

/// Statistics collected while loading the two input collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Predictions present in the prediction collection
    pub total_predictions: usize,

    /// Predictions dropped because `score <= min_prob`
    pub filtered_low_confidence: usize,

    /// Ground-truth boxes in the ground-truth collection
    pub ground_truth_boxes: usize,

    /// Categories in the label map, background included
    pub categories: usize,
}

impl LoadStats {
    /// Create a new `LoadStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of predictions that survived the threshold
    pub fn retained_predictions(&self) -> usize {
        self.total_predictions
            .saturating_sub(self.filtered_low_confidence)
    }

    /// Emit the counters through the `log` facade
    pub fn log_summary(&self) {
        info!(
            "loaded {} ground truth boxes in {} categories",
            self.ground_truth_boxes, self.categories
        );
        info!(
            "loaded {} predictions, {} below threshold, {} retained",
            self.total_predictions,
            self.filtered_low_confidence,
            self.retained_predictions()
        );
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "LoadStats {{ ground_truth: {}, categories: {}, predictions: {}, filtered: {}, retained: {} }}",
            self.ground_truth_boxes,
            self.categories,
            self.total_predictions,
            self.filtered_low_confidence,
            self.retained_predictions()
        )
    }
}
