//! # detection-eval
//!
//! A Rust library for evaluating object detector predictions against
//! COCO-style ground truth with greedy matching.
//!
//! For each category the library computes:
//! - **AP** (Average Precision), interpolated over recall buckets
//! - **AR** (Average Recall), interpolated over the same buckets
//!
//! and reports **mAP** / **mAR** across the label map.
//!
//! ## How it works
//!
//! - Predictions scored at or below `min_prob` are dropped on load
//! - The rest are visited in descending score order and matched to the
//!   best-overlapping ground-truth box of the same image, using IoU under the
//!   inclusive pixel convention (`(w + 1) * (h + 1)` areas)
//! - A match counts only if the overlap exceeds `min_overlap`, the box is
//!   unclaimed and the categories agree
//! - Precision and recall are sampled at recall thresholds `0, 1/n, 2/n, ...`
//!   below the maximum recall (`COCO`) or below 1.0 (`VOC`)
//!
//! ## Quick Start
//!
//! ```rust
//! use detection_eval::{evaluate, load_from_strings, EvalConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gt = r#"{
//!     "annotations": [{"id": 1, "image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10]}],
//!     "categories": [{"id": "1", "name": "person"}]
//! }"#;
//! let predictions = r#"[{"image_id": "a", "category_id": "1", "bbox": [0, 0, 10, 10], "score": 0.9}]"#;
//!
//! let config = EvalConfig::default();
//! let data = load_from_strings(gt, predictions, &config)?;
//! let report = evaluate(&data, &config)?;
//! print!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Input format
//!
//! Ground truth:
//!
//! ```json
//! {
//!   "annotations": [
//!     {"id": 1, "image_id": "img_001", "category_id": "1", "bbox": [x, y, width, height]}
//!   ],
//!   "categories": [
//!     {"id": "1", "name": "person"}
//!   ]
//! }
//! ```
//!
//! Predictions are a flat list:
//!
//! ```json
//! [
//!   {"image_id": "img_001", "category_id": "1", "bbox": [x, y, width, height], "score": 0.95}
//! ]
//! ```
//!
//! Identifiers may be strings or numbers; they are compared as strings.

pub mod error;
pub mod types;
pub mod config;
pub mod threshold;
pub mod stats;
pub mod loader;
pub mod metrics;
pub mod matching;
pub mod evaluator;
pub mod report;

// Re-export commonly used types and functions
pub use error::{EvalError, Result};
pub use types::{
    BoundingBox, Category, CategoryFilter, FalsePositiveKind, GroundTruth, GroundTruthBox,
    MatchResult, Prediction,
};
pub use config::{EvalConfig, EvalType};
pub use loader::{load_from_files, load_from_strings, EvalData};
pub use matching::{assign, Assignment};
pub use evaluator::{evaluate, evaluate_curve, evaluate_files};
pub use report::{CategoryMetrics, EvaluationReport};
