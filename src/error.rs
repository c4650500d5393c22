//! Error types for the detection-eval library.

use thiserror::Error;

/// Result type for detection-eval operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error types that can occur during detector evaluation.
#[derive(Error, Debug)]
pub enum EvalError {
    /// An input collection could not be read or does not have the expected structure.
    ///
    /// `collection` names the offending file, or the kind of collection when the
    /// input came from memory.
    #[error("Could not load {collection}: {reason}")]
    DataLoad { collection: String, reason: String },

    /// The averaging convention is neither `COCO` nor `VOC`.
    #[error("There is no such type as {0}. Known types: COCO, VOC")]
    UnsupportedEvalType(String),

    /// A configuration constant is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error while writing the report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EvalError {
    pub(crate) fn data_load(collection: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataLoad {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }
}
