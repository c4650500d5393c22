//! Evaluation configuration.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Averaging convention used when interpolating the precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalType {
    /// Thresholds span `[0, max observed recall)`.
    Coco,
    /// Thresholds span `[0, 1)`.
    Voc,
}

impl EvalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coco => "COCO",
            Self::Voc => "VOC",
        }
    }
}

impl FromStr for EvalType {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "COCO" => Ok(Self::Coco),
            "VOC" => Ok(Self::Voc),
            other => Err(EvalError::UnsupportedEvalType(other.to_string())),
        }
    }
}

impl fmt::Display for EvalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable constants of an evaluation run.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Minimum IoU for a match; the comparison is strictly greater-than.
    pub min_overlap: f64,
    /// Predictions with `score <= min_prob` are dropped at load time.
    pub min_prob: f64,
    /// Number of recall buckets used for interpolation.
    pub number_of_segments: usize,
    /// `COCO` or `VOC`. Kept as text and checked when curves are built.
    pub eval_type: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            min_overlap: 0.5,
            min_prob: 0.01,
            number_of_segments: 10,
            eval_type: EvalType::Coco.to_string(),
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_overlap(mut self, min_overlap: f64) -> Self {
        self.min_overlap = min_overlap;
        self
    }

    pub fn with_min_prob(mut self, min_prob: f64) -> Self {
        self.min_prob = min_prob;
        self
    }

    pub fn with_number_of_segments(mut self, number_of_segments: usize) -> Self {
        self.number_of_segments = number_of_segments;
        self
    }

    pub fn with_eval_type(mut self, eval_type: impl Into<String>) -> Self {
        self.eval_type = eval_type.into();
        self
    }

    /// Load a configuration from a JSON document.
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|err| EvalError::data_load("config", err))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let collection = path.display().to_string();
        let file = File::open(path).map_err(|err| EvalError::data_load(&collection, err))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| EvalError::data_load(&collection, err))?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges. The eval type is deliberately not checked here.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_overlap) {
            return Err(EvalError::InvalidConfig(format!(
                "min_overlap must be between 0.0 and 1.0, got {}",
                self.min_overlap
            )));
        }
        if !(0.0..=1.0).contains(&self.min_prob) {
            return Err(EvalError::InvalidConfig(format!(
                "min_prob must be between 0.0 and 1.0, got {}",
                self.min_prob
            )));
        }
        if self.number_of_segments == 0 {
            return Err(EvalError::InvalidConfig(
                "number_of_segments must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
