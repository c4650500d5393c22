//! Core data types for ground truth, predictions and match outcomes.

use serde::{Deserialize, Deserializer, Serialize};

/// Category id of the synthetic background class.
pub const BACKGROUND_ID: &str = "none_of_the_above";

/// Display name of the synthetic background class.
pub const BACKGROUND_NAME: &str = "background";

/// Represents a bounding box in COCO format (x, y, width, height).
///
/// Coordinates are pixel positions in LTWH (Left-Top-Width-Height) format.
/// On the wire a box is the array `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right coordinate (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom coordinate (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area under the inclusive pixel convention, `(w + 1) * (h + 1)`.
    pub fn pixel_area(&self) -> f64 {
        (self.width + 1.0) * (self.height + 1.0)
    }
}

impl TryFrom<Vec<f64>> for BoundingBox {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            &[x, y, width, height] => Ok(Self::new(x, y, width, height)),
            other => Err(format!(
                "bbox must have 4 values [x, y, w, h], got {}",
                other.len()
            )),
        }
    }
}

/// Represents a category from the label map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_label")]
    pub id: String,
    /// Display name used in the report.
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether this is the synthetic background class excluded from the report.
    pub fn is_background(&self) -> bool {
        self.id == BACKGROUND_ID || self.name == BACKGROUND_NAME
    }
}

/// A ground-truth annotation.
///
/// `id` is unique across the whole collection and is the key recorded when the
/// box is consumed by a true positive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroundTruthBox {
    #[serde(deserialize_with = "deserialize_label")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_label")]
    pub image_id: String,
    #[serde(deserialize_with = "deserialize_label")]
    pub category_id: String,
    pub bbox: BoundingBox,
}

impl GroundTruthBox {
    pub fn new(
        id: impl Into<String>,
        image_id: impl Into<String>,
        category_id: impl Into<String>,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox,
        }
    }
}

/// A detector output with its confidence score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    #[serde(deserialize_with = "deserialize_label")]
    pub image_id: String,
    #[serde(deserialize_with = "deserialize_label")]
    pub category_id: String,
    pub bbox: BoundingBox,
    /// Confidence in `[0, 1]`
    #[serde(deserialize_with = "deserialize_score")]
    pub score: f64,
}

impl Prediction {
    pub fn new(
        image_id: impl Into<String>,
        category_id: impl Into<String>,
        bbox: BoundingBox,
        score: f64,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox,
            score,
        }
    }
}

/// The ground-truth document: annotations plus the label map.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundTruth {
    pub annotations: Vec<GroundTruthBox>,
    pub categories: Vec<Category>,
}

/// Why a prediction received no credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FalsePositiveKind {
    /// No ground-truth box in the image overlaps above the threshold.
    NoOverlap,
    /// The best-overlapping box was already claimed by a higher-scored prediction.
    AlreadyMatched,
    /// The best-overlapping box belongs to another category. The box stays claimable.
    WrongCategory,
}

/// Classification of a single prediction after greedy assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    TruePositive { ground_truth_id: String },
    FalsePositive(FalsePositiveKind),
}

impl MatchResult {
    pub fn is_true_positive(&self) -> bool {
        matches!(self, Self::TruePositive { .. })
    }

    pub fn is_false_positive(&self) -> bool {
        !self.is_true_positive()
    }
}

/// Which predictions a precision-recall curve is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<'a> {
    /// Every prediction, measured against every ground-truth box.
    All,
    /// Only predictions and ground truth of the given category id.
    Category(&'a str),
}

impl<'a> CategoryFilter<'a> {
    pub fn accepts(&self, category_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => *id == category_id,
        }
    }
}

/// Accept identifiers written either as JSON strings or numbers.
///
/// Numbers are rendered with `Display`, so `1` and `1.0` both become `"1"`.
fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Signed(value) => value.to_string(),
        Label::Unsigned(value) => value.to_string(),
        Label::Float(value) => value.to_string(),
    })
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let score = f64::deserialize(deserializer)?;
    if !(0.0..=1.0).contains(&score) {
        return Err(serde::de::Error::custom(format!(
            "score must be between 0.0 and 1.0, got {}",
            score
        )));
    }
    Ok(score)
}
