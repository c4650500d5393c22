//! Greedy matching of predictions to ground truth.
//!
//! Predictions are visited in descending score order. Each one is compared
//! against every ground-truth box of its image regardless of category, and the
//! best-overlapping box decides the outcome:
//!
//! - nothing overlaps above the threshold: false positive
//! - the box was already claimed: false positive
//! - the box has a different category: false positive, box stays claimable
//! - otherwise: true positive, box is claimed

use crate::metrics::iou::overlap;
use crate::types::{CategoryFilter, FalsePositiveKind, GroundTruthBox, MatchResult, Prediction};
use log::trace;
use std::collections::{HashMap, HashSet};

/// Ground-truth boxes grouped by image id, each group in stored order.
#[derive(Debug, Clone)]
pub struct ImageIndex<'a> {
    ground_truth: &'a [GroundTruthBox],
    by_image: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ImageIndex<'a> {
    pub fn new(ground_truth: &'a [GroundTruthBox]) -> Self {
        let mut by_image: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (index, gt) in ground_truth.iter().enumerate() {
            by_image.entry(gt.image_id.as_str()).or_default().push(index);
        }

        Self {
            ground_truth,
            by_image,
        }
    }

    /// Boxes of one image in the order they were loaded.
    pub fn boxes_in(&self, image_id: &str) -> impl Iterator<Item = &'a GroundTruthBox> + '_ {
        let ground_truth = self.ground_truth;
        self.by_image
            .get(image_id)
            .into_iter()
            .flatten()
            .map(move |&index| &ground_truth[index])
    }
}

/// The best-overlapping ground-truth box for a prediction.
#[derive(Debug, Clone, Copy)]
pub struct BestMatch<'a> {
    pub ground_truth: &'a GroundTruthBox,
    pub overlap: f64,
}

/// Find the ground-truth box overlapping `prediction` the most.
///
/// Returns `None` unless the best overlap is strictly greater than
/// `min_overlap`. Among boxes with equal overlap the first one yielded by
/// `candidates` wins.
///
/// # Example
///
/// ```
/// use detection_eval::matching::find_best_match;
/// use detection_eval::types::{BoundingBox, GroundTruthBox, Prediction};
///
/// let gts = vec![GroundTruthBox::new("1", "a", "1", BoundingBox::new(0.0, 0.0, 10.0, 10.0))];
/// let prediction = Prediction::new("a", "1", BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.9);
///
/// let best = find_best_match(&prediction, &gts, 0.5).unwrap();
/// assert_eq!(best.ground_truth.id, "1");
/// assert_eq!(best.overlap, 1.0);
/// ```
pub fn find_best_match<'a, I>(
    prediction: &Prediction,
    candidates: I,
    min_overlap: f64,
) -> Option<BestMatch<'a>>
where
    I: IntoIterator<Item = &'a GroundTruthBox>,
{
    let mut best: Option<BestMatch<'a>> = None;

    for gt in candidates {
        let Some(ov) = overlap(&gt.bbox, &prediction.bbox) else {
            continue;
        };

        if best.map_or(true, |best| ov > best.overlap) {
            best = Some(BestMatch {
                ground_truth: gt,
                overlap: ov,
            });
        }
    }

    best.filter(|best| best.overlap > min_overlap)
}

/// Outcome of a full greedy assignment run.
///
/// The per-prediction vectors are aligned and in descending score order.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// Index of each prediction in the input slice.
    pub order: Vec<usize>,
    pub results: Vec<MatchResult>,
    pub scores: Vec<f64>,
    pub predicted_categories: Vec<String>,
    /// Category of every ground-truth box, in load order, independent of matching.
    pub ground_truth_categories: Vec<String>,
    /// Ids of ground-truth boxes claimed by a true positive.
    pub matched: HashSet<String>,
}

impl Assignment {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True-positive flags of the predictions passing `filter`, in score order.
    pub fn outcomes<'s>(&'s self, filter: CategoryFilter<'s>) -> impl Iterator<Item = bool> + 's {
        self.results
            .iter()
            .zip(self.predicted_categories.iter())
            .filter(move |(_, category)| filter.accepts(category))
            .map(|(result, _)| result.is_true_positive())
    }

    /// Number of predictions passing `filter`.
    pub fn prediction_count(&self, filter: CategoryFilter<'_>) -> usize {
        self.predicted_categories
            .iter()
            .filter(|category| filter.accepts(category))
            .count()
    }

    /// Number of ground-truth boxes passing `filter`.
    pub fn ground_truth_count(&self, filter: CategoryFilter<'_>) -> usize {
        self.ground_truth_categories
            .iter()
            .filter(|category| filter.accepts(category))
            .count()
    }

    pub fn true_positives(&self) -> usize {
        self.results.iter().filter(|r| r.is_true_positive()).count()
    }

    pub fn false_positives(&self) -> usize {
        self.results.iter().filter(|r| r.is_false_positive()).count()
    }
}

/// Classifies predictions one at a time, owning the set of claimed ground-truth ids.
///
/// The claimed set only grows, so predictions must be fed in descending score
/// order; [`assign`] takes care of that.
#[derive(Debug)]
pub struct GreedyAssigner<'a> {
    index: ImageIndex<'a>,
    min_overlap: f64,
    matched: HashSet<String>,
}

impl<'a> GreedyAssigner<'a> {
    pub fn new(ground_truth: &'a [GroundTruthBox], min_overlap: f64) -> Self {
        Self {
            index: ImageIndex::new(ground_truth),
            min_overlap,
            matched: HashSet::new(),
        }
    }

    /// Classify one prediction, claiming its ground-truth box on a true positive.
    pub fn classify(&mut self, prediction: &Prediction) -> MatchResult {
        let best = find_best_match(
            prediction,
            self.index.boxes_in(&prediction.image_id),
            self.min_overlap,
        );

        let Some(best) = best else {
            return MatchResult::FalsePositive(FalsePositiveKind::NoOverlap);
        };
        let gt = best.ground_truth;

        if self.matched.contains(&gt.id) {
            MatchResult::FalsePositive(FalsePositiveKind::AlreadyMatched)
        } else if gt.category_id != prediction.category_id {
            MatchResult::FalsePositive(FalsePositiveKind::WrongCategory)
        } else {
            self.matched.insert(gt.id.clone());
            MatchResult::TruePositive {
                ground_truth_id: gt.id.clone(),
            }
        }
    }

    pub fn matched(&self) -> &HashSet<String> {
        &self.matched
    }

    pub fn into_matched(self) -> HashSet<String> {
        self.matched
    }
}

/// Sort predictions by descending score and classify each one.
///
/// The sort is stable, so predictions with equal scores keep their load order.
pub fn assign(
    predictions: &[Prediction],
    ground_truth: &[GroundTruthBox],
    min_overlap: f64,
) -> Assignment {
    let mut order: Vec<usize> = (0..predictions.len()).collect();
    order.sort_by(|&a, &b| predictions[b].score.total_cmp(&predictions[a].score));

    let mut assigner = GreedyAssigner::new(ground_truth, min_overlap);
    let mut results = Vec::with_capacity(order.len());
    let mut scores = Vec::with_capacity(order.len());
    let mut predicted_categories = Vec::with_capacity(order.len());

    for (rank, &index) in order.iter().enumerate() {
        let prediction = &predictions[index];
        let result = assigner.classify(prediction);
        trace!(
            "prediction {}/{} (score {:.4}): {:?}",
            rank + 1,
            order.len(),
            prediction.score,
            result
        );

        results.push(result);
        scores.push(prediction.score);
        predicted_categories.push(prediction.category_id.clone());
    }

    Assignment {
        order,
        results,
        scores,
        predicted_categories,
        ground_truth_categories: ground_truth
            .iter()
            .map(|gt| gt.category_id.clone())
            .collect(),
        matched: assigner.into_matched(),
    }
}
