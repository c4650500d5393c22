//! Stress tests with large datasets and complex scenarios.

use detection_eval::evaluator::evaluate;
use detection_eval::loader::EvalData;
use detection_eval::stats::LoadStats;
use detection_eval::types::{BoundingBox, Category, GroundTruthBox, Prediction};
use detection_eval::EvalConfig;

fn grid_box(i: usize) -> BoundingBox {
    let x = (i % 100) as f64 * 10.0;
    let y = (i / 100) as f64 * 10.0;
    BoundingBox::new(x, y, 7.0, 7.0)
}

#[test]
fn test_1000_annotations_single_image() {
    let ground_truth: Vec<GroundTruthBox> = (0..1000)
        .map(|i| GroundTruthBox::new(i.to_string(), "img", "1", grid_box(i)))
        .collect();
    let predictions: Vec<Prediction> = (0..1000)
        .map(|i| Prediction::new("img", "1", grid_box(i), 0.9 - i as f64 / 10000.0))
        .collect();

    let data = EvalData {
        ground_truth,
        categories: vec![Category::new("1", "object")],
        predictions,
        stats: LoadStats::new(),
    };

    let report = evaluate(&data, &EvalConfig::default()).unwrap();
    assert!((report.mean_ap - 1.0).abs() < 1e-10, "mAP: {}", report.mean_ap);
    assert_eq!(report.categories[0].predictions, 1000);
}

#[test]
fn test_many_images_and_classes() {
    let mut ground_truth = Vec::new();
    let mut predictions = Vec::new();
    let categories: Vec<Category> = (0..20)
        .map(|c| Category::new(c.to_string(), format!("class_{}", c)))
        .collect();

    for image in 0..100 {
        for object in 0..5 {
            let category = ((image + object) % 20).to_string();
            let bbox = BoundingBox::new(object as f64 * 50.0, 0.0, 40.0, 40.0);
            let id = format!("{}_{}", image, object);
            ground_truth.push(GroundTruthBox::new(id, image.to_string(), category.clone(), bbox));

            // every other object is detected, the rest get a shifted miss
            if object % 2 == 0 {
                predictions.push(Prediction::new(image.to_string(), category, bbox, 0.8));
            } else {
                let miss = BoundingBox::new(bbox.x + 30.0, bbox.y + 30.0, 40.0, 40.0);
                predictions.push(Prediction::new(image.to_string(), category, miss, 0.6));
            }
        }
    }

    let data = EvalData {
        ground_truth,
        categories,
        predictions,
        stats: LoadStats::new(),
    };

    let report = evaluate(&data, &EvalConfig::default()).unwrap();
    assert_eq!(report.categories.len(), 20);
    for row in &report.categories {
        assert!(row.ap > 0.0 && row.ap <= 1.0, "{}: {}", row.category.name, row.ap);
        assert!(row.ar > 0.0 && row.ar <= 1.0, "{}: {}", row.category.name, row.ar);
    }
    assert!(report.pooled.ap > 0.0);
}
