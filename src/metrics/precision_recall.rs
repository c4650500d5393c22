//! Precision-recall curve construction.

/// Cumulative precision-recall curve over score-ordered predictions.
///
/// Index `i` describes the first `i + 1` predictions of the sequence the curve
/// was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrCurve {
    pub cumulative_tp: Vec<usize>,
    pub cumulative_fp: Vec<usize>,
    pub recall: Vec<f64>,
    pub precision: Vec<f64>,
}

impl PrCurve {
    /// Build the curve from true-positive flags in descending score order.
    ///
    /// # Example
    ///
    /// ```
    /// use detection_eval::metrics::precision_recall::PrCurve;
    ///
    /// let curve = PrCurve::from_outcomes([true, false, true], 4);
    /// assert_eq!(curve.cumulative_tp, vec![1, 1, 2]);
    /// assert_eq!(curve.recall, vec![0.25, 0.25, 0.5]);
    /// ```
    pub fn from_outcomes<I>(is_true_positive: I, total_ground_truth: usize) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut curve = Self::default();
        let mut tp = 0;
        let mut fp = 0;

        for is_tp in is_true_positive {
            if is_tp {
                tp += 1;
            } else {
                fp += 1;
            }

            curve.cumulative_tp.push(tp);
            curve.cumulative_fp.push(fp);
            curve.recall.push(calculate_recall(tp, total_ground_truth));
            curve.precision.push(calculate_precision(tp, fp));
        }

        curve
    }

    pub fn len(&self) -> usize {
        self.recall.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recall.is_empty()
    }

    /// Largest recall reached anywhere on the curve, 0.0 for an empty curve.
    pub fn max_recall(&self) -> f64 {
        self.recall.iter().copied().fold(0.0, f64::max)
    }
}

/// `tp / (tp + fp)`, or 0.0 when there are no detections.
pub fn calculate_precision(true_positives: usize, false_positives: usize) -> f64 {
    let detections = true_positives + false_positives;
    if detections == 0 {
        return 0.0;
    }
    true_positives as f64 / detections as f64
}

/// `tp / total_ground_truth`, or 0.0 when there is no ground truth.
pub fn calculate_recall(true_positives: usize, total_ground_truth: usize) -> f64 {
    if total_ground_truth == 0 {
        return 0.0;
    }
    true_positives as f64 / total_ground_truth as f64
}
