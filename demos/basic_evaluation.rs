//! Basic evaluation example demonstrating core functionality.
//!
//! Run with `RUST_LOG=debug` to see per-category log lines.

use detection_eval::{
    evaluate, load_from_strings, metrics::iou::calculate_iou, BoundingBox, EvalConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    println!("=== Detector Evaluation Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation (inclusive pixels)");
    let bbox1 = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
    let bbox2 = BoundingBox::new(30.0, 30.0, 50.0, 50.0);
    let iou = calculate_iou(&bbox1, &bbox2);
    println!("   IoU between overlapping boxes: {:.4}", iou);
    println!();

    // Example 2: Load ground truth and predictions
    println!("2. Loading Annotations");
    let ground_truth_json = r#"{
        "annotations": [
            {"id": 1, "image_id": "image1", "category_id": "person", "bbox": [100.0, 100.0, 200.0, 150.0]},
            {"id": 2, "image_id": "image1", "category_id": "car", "bbox": [350.0, 200.0, 100.0, 120.0]},
            {"id": 3, "image_id": "image2", "category_id": "car", "bbox": [20.0, 40.0, 80.0, 60.0]}
        ],
        "categories": [
            {"id": "none_of_the_above", "name": "background"},
            {"id": "person", "name": "Person"},
            {"id": "car", "name": "Car"}
        ]
    }"#;

    let predictions_json = r#"[
        {"image_id": "image1", "category_id": "person", "bbox": [105.0, 98.0, 195.0, 155.0], "score": 0.95},
        {"image_id": "image1", "category_id": "car", "bbox": [348.0, 198.0, 105.0, 125.0], "score": 0.87},
        {"image_id": "image1", "category_id": "person", "bbox": [50.0, 50.0, 80.0, 90.0], "score": 0.42},
        {"image_id": "image2", "category_id": "person", "bbox": [22.0, 41.0, 78.0, 60.0], "score": 0.40},
        {"image_id": "image2", "category_id": "car", "bbox": [22.0, 41.0, 78.0, 60.0], "score": 0.35},
        {"image_id": "image2", "category_id": "car", "bbox": [300.0, 300.0, 10.0, 10.0], "score": 0.005}
    ]"#;

    let config = EvalConfig::default();
    let data = load_from_strings(ground_truth_json, predictions_json, &config)?;
    println!("   {}", data.stats.summary_string());
    println!();

    // Example 3: Evaluation under both averaging conventions
    for eval_type in ["COCO", "VOC"] {
        println!("3. Evaluation ({})", eval_type);
        let config = config.clone().with_eval_type(eval_type);
        let report = evaluate(&data, &config)?;
        report.write_table(&mut std::io::stdout())?;
        println!(
            "   pooled: AP {:.2}%, AR {:.2}%",
            report.pooled.ap * 100.0,
            report.pooled.ar * 100.0
        );
        println!();
    }

    println!("=== Example Complete ===");

    Ok(())
}
