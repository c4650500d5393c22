//! Intersection over Union (IoU) under the inclusive pixel convention.
//!
//! Both the intersection side lengths and box areas count boundary pixels, so
//! a side spanning `x1..=x2` is `x2 - x1 + 1` long and a `w x h` box covers
//! `(w + 1) * (h + 1)` pixels. Reference numbers from existing COCO-format
//! evaluations depend on this, so it must not be replaced with the continuous
//! formula.

use crate::types::BoundingBox;

/// Overlap between two boxes, or `None` when their inclusive rectangles do not
/// intersect.
///
/// # Example
///
/// ```
/// use detection_eval::metrics::iou::overlap;
/// use detection_eval::types::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let b = BoundingBox::new(50.0, 50.0, 5.0, 5.0);
/// assert_eq!(overlap(&a, &a), Some(1.0));
/// assert_eq!(overlap(&a, &b), None);
/// ```
pub fn overlap(bbox1: &BoundingBox, bbox2: &BoundingBox) -> Option<f64> {
    let x_left = bbox1.x.max(bbox2.x);
    let y_top = bbox1.y.max(bbox2.y);
    let x_right = bbox1.right().min(bbox2.right());
    let y_bottom = bbox1.bottom().min(bbox2.bottom());

    let intersection_width = x_right - x_left + 1.0;
    let intersection_height = y_bottom - y_top + 1.0;

    if intersection_width <= 0.0 || intersection_height <= 0.0 {
        return None;
    }

    let intersection_area = intersection_width * intersection_height;
    let union_area = bbox1.pixel_area() + bbox2.pixel_area() - intersection_area;

    if union_area <= 0.0 {
        return None;
    }

    Some(intersection_area / union_area)
}

/// Calculate the inclusive-pixel IoU between two bounding boxes.
///
/// Returns 0.0 for boxes that do not intersect.
///
/// # Example
///
/// ```
/// use detection_eval::metrics::iou::calculate_iou;
/// use detection_eval::types::BoundingBox;
///
/// let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
/// let iou = calculate_iou(&bbox1, &bbox2);
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    overlap(bbox1, bbox2).unwrap_or(0.0)
}
