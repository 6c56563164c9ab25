// --- Файл: src/data/error.rs ---

//! Error types shared by datasets, samplers, loaders and k-fold splitting.

use thiserror::Error;

/// Errors raised at the boundary of every data operation.
///
/// Constructors fail before an object exists; iteration calls fail without
/// moving the loader cursor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("unsupported container for a dataset: expected a sequence or a string-keyed mapping, got {found}")]
    InvalidKind { found: String },

    #[error("keyed dataset requires string keys, got {found}")]
    InvalidKeyType { found: String },

    #[error("index {index} is out of range for a dataset of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("sample size {size} exceeds the number of items {n}")]
    InvalidSize { size: usize, n: usize },

    #[error("batch size {batch_size} must be in [1, {n}]")]
    InvalidBatchSize { batch_size: usize, n: usize },

    #[error("fold count {n_folds} must be in [2, {n}]")]
    InvalidFoldCount { n_folds: usize, n: usize },

    #[error("data loader is exhausted; call reset() to start a new pass")]
    Exhausted,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = DataError::OutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 is out of range for a dataset of length 3"
        );

        let err = DataError::InvalidFoldCount { n_folds: 1, n: 10 };
        assert!(err.to_string().contains("[2, 10]"));
    }

    #[test]
    fn test_json_error_becomes_config() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: DataError = parse.unwrap_err().into();
        assert!(matches!(err, DataError::Config(_)));
    }
}
