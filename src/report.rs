//! Evaluation report and its text rendering.

use crate::error::Result;
use crate::metrics::ap::ApAr;
use crate::types::Category;
use std::fmt;
use std::io::Write;

/// Result row for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMetrics {
    pub category: Category,
    /// Average precision
    pub ap: f64,
    /// Average recall
    pub ar: f64,
    /// Retained predictions labelled with this category
    pub predictions: usize,
    /// Ground-truth boxes of this category
    pub ground_truth: usize,
}

/// Per-category results plus dataset-wide means.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub eval_type: String,
    /// One row per non-background category, in label map order
    pub categories: Vec<CategoryMetrics>,
    /// Mean AP over the full label map, background included
    pub mean_ap: f64,
    /// Mean AR over the full label map, background included
    pub mean_ar: f64,
    /// AP/AR of all predictions pooled against all ground truth
    pub pooled: ApAr,
}

impl EvaluationReport {
    /// Look up the row of a category id.
    pub fn category(&self, id: &str) -> Option<&CategoryMetrics> {
        self.categories.iter().find(|row| row.category.id == id)
    }

    /// Write the report table: a header, one row per category, and the mean row last.
    ///
    /// Values are percentages with two decimals.
    pub fn write_table<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "|| Name || mAR || mAP ||")?;
        for row in &self.categories {
            writeln!(
                f,
                "|| {} || {:.2}% || {:.2}% ||",
                row.category.name,
                row.ar * 100.0,
                row.ap * 100.0
            )?;
        }
        writeln!(
            f,
            "|| ave || {:.2}% || {:.2}% ||",
            self.mean_ar * 100.0,
            self.mean_ap * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> EvaluationReport {
        EvaluationReport {
            eval_type: "COCO".to_string(),
            categories: vec![
                CategoryMetrics {
                    category: Category::new("1", "person"),
                    ap: 1.0,
                    ar: 0.5,
                    predictions: 2,
                    ground_truth: 2,
                },
                CategoryMetrics {
                    category: Category::new("2", "car"),
                    ap: 0.0,
                    ar: 0.0,
                    predictions: 0,
                    ground_truth: 1,
                },
            ],
            mean_ap: 1.0 / 3.0,
            mean_ar: 0.5 / 3.0,
            pooled: ApAr::new(0.5, 0.25),
        }
    }

    #[test]
    fn test_table_layout() {
        let table = report().to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "|| Name || mAR || mAP ||");
        assert_eq!(lines[1], "|| person || 50.00% || 100.00% ||");
        assert_eq!(lines[2], "|| car || 0.00% || 0.00% ||");
        assert_eq!(lines[3], "|| ave || 16.67% || 33.33% ||");
    }

    #[test]
    fn test_write_table() {
        let mut buffer = Vec::new();
        report().write_table(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("|| ave || 16.67% || 33.33% ||\n"));
    }

    #[test]
    fn test_category_lookup() {
        let report = report();
        assert_eq!(report.category("2").unwrap().category.name, "car");
        assert!(report.category("3").is_none());
    }
}
