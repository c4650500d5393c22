//! Metrics calculation modules for detector evaluation.

pub mod iou;
pub mod ap;
pub mod precision_recall;

pub use iou::{calculate_iou, overlap};
pub use ap::{calculate_map, interpolate, recall_thresholds, ApAr};
pub use precision_recall::{calculate_precision, calculate_recall, PrCurve};
