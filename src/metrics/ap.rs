//! Bucketed Average Precision (AP) and Average Recall (AR) interpolation.

use crate::config::EvalType;
use crate::metrics::precision_recall::PrCurve;

/// Average precision and average recall of one curve.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ApAr {
    pub ap: f64,
    pub ar: f64,
}

impl ApAr {
    pub fn new(ap: f64, ar: f64) -> Self {
        Self { ap, ar }
    }
}

/// Recall thresholds `0, 1/n, 2/n, ...` strictly below `max_recall`.
///
/// The thresholds are `k * (1 / n)` rather than `k / n`, and their count is
/// `ceil(max_recall * n)` computed as `ceil(max_recall / (1 / n))`, which keeps
/// the floating point values identical to reference evaluations.
///
/// # Example
///
/// ```
/// use detection_eval::metrics::ap::recall_thresholds;
///
/// assert_eq!(recall_thresholds(1.0, 10).len(), 10);
/// assert_eq!(recall_thresholds(0.5, 10).len(), 5);
/// assert!(recall_thresholds(0.0, 10).is_empty());
/// ```
pub fn recall_thresholds(max_recall: f64, number_of_segments: usize) -> Vec<f64> {
    if number_of_segments == 0 || max_recall <= 0.0 {
        return Vec::new();
    }

    let step = 1.0 / number_of_segments as f64;
    let count = (max_recall / step).ceil() as usize;
    (0..count).map(|k| k as f64 * step).collect()
}

/// Interpolate AP and AR from a precision-recall curve.
///
/// For each threshold `t` the predictions with `recall >= t` contribute their
/// maximum precision and minimum recall. When none qualify, precision is 0 and
/// recall falls back to the curve's maximum recall. Each threshold adds
/// `1 / number_of_segments` of its value, so under `COCO` with a maximum recall
/// below 1.0 the unsampled buckets count as zero.
///
/// An empty curve yields `(0, 0)`.
pub fn interpolate(curve: &PrCurve, number_of_segments: usize, eval_type: EvalType) -> ApAr {
    if curve.is_empty() || number_of_segments == 0 {
        return ApAr::default();
    }

    let observed_max_recall = curve.max_recall();
    let max_recall = match eval_type {
        EvalType::Coco => observed_max_recall,
        EvalType::Voc => 1.0,
    };

    let segments = number_of_segments as f64;
    let mut result = ApAr::default();

    for t in recall_thresholds(max_recall, number_of_segments) {
        let (max_precision, min_recall) = curve
            .precision
            .iter()
            .zip(curve.recall.iter())
            .filter(|(_, &r)| r >= t)
            .fold(None, |acc: Option<(f64, f64)>, (&p, &r)| match acc {
                Some((best_p, best_r)) => Some((best_p.max(p), best_r.min(r))),
                None => Some((p, r)),
            })
            .unwrap_or((0.0, observed_max_recall));

        result.ap += max_precision / segments;
        result.ar += min_recall / segments;
    }

    result
}

/// Mean over a fixed denominator, accumulated term by term.
///
/// The denominator is passed separately because the report divides by the full
/// category count, including categories that were not evaluated.
///
/// # Example
///
/// ```
/// use detection_eval::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// assert!((calculate_map(&class_aps, 4) - 0.825).abs() < 1e-10);
/// assert!((calculate_map(&class_aps, 5) - 0.66).abs() < 1e-10);
/// ```
pub fn calculate_map(values: &[f64], denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    let denominator = denominator as f64;
    values.iter().fold(0.0, |mean, value| mean + value / denominator)
}
