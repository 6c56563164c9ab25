// --- Файл: src/data/config.rs ---

//! Serializable option records for samplers and k-fold splitting.
//!
//! Every record fills missing fields with its defaults, so a JSON document
//! only has to name what it changes:
//!
//! ```
//! use rustyloader::data::SamplerConfig;
//!
//! let config = SamplerConfig::from_json(r#"{"kind": "batch", "batch_size": 4}"#).unwrap();
//! let sampler = config.build(10).unwrap();
//! assert_eq!(sampler.batch_size(), 4);
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::sampler::{BatchSampler, RandomSampler, Sampler, SequentialSampler};

/// Options for [`RandomSampler`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSamplerOptions {
    /// Number of indices to draw; `None` means all `n`.
    pub size: Option<usize>,
    /// Draw independently, allowing duplicates.
    pub replacement: bool,
    /// Fixed seed; `None` re-seeds from the wall clock on each call.
    pub seed: Option<u64>,
}

/// Options for [`BatchSampler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSamplerOptions {
    pub batch_size: usize,
    /// Omit the trailing incomplete batch.
    pub drop_last: bool,
    /// Permute `[0, n)` before batching.
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for BatchSamplerOptions {
    fn default() -> Self {
        Self {
            batch_size: 1,
            drop_last: false,
            shuffle: false,
            seed: None,
        }
    }
}

/// Options for [`KFold`](super::kfold::KFold).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KFoldOptions {
    pub n_folds: usize,
    /// Keep the permuted order instead of sorting the sampled indices.
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for KFoldOptions {
    fn default() -> Self {
        Self {
            n_folds: 5,
            shuffle: false,
            seed: None,
        }
    }
}

/// A sampler described as data, resolved against a dataset size by [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SamplerConfig {
    Sequential,
    Random(RandomSamplerOptions),
    Batch(BatchSamplerOptions),
}

impl SamplerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Instantiates the sampler for a dataset of `n` items.
    pub fn build(&self, n: usize) -> Result<Box<dyn Sampler>> {
        Ok(match self {
            SamplerConfig::Sequential => Box::new(SequentialSampler::new(n)),
            SamplerConfig::Random(options) => {
                Box::new(RandomSampler::with_options(n, options.clone())?)
            }
            SamplerConfig::Batch(options) => {
                Box::new(BatchSampler::with_options(n, options.clone())?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SamplerConfig::from_json(r#"{"kind": "random"}"#).unwrap();
        assert_eq!(config, SamplerConfig::Random(RandomSamplerOptions::default()));

        let options: KFoldOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.n_folds, 5);
        assert!(!options.shuffle);
    }

    #[test]
    fn test_build_batch_sampler() {
        let config = SamplerConfig::from_json(
            r#"{"kind": "batch", "batch_size": 3, "drop_last": true, "seed": 1}"#,
        )
        .unwrap();
        let sampler = config.build(10).unwrap();
        assert_eq!(sampler.batch_size(), 3);
        assert_eq!(sampler.sample().len(), 9);
    }

    #[test]
    fn test_build_propagates_validation() {
        let config = SamplerConfig::Random(RandomSamplerOptions {
            size: Some(5),
            ..Default::default()
        });
        assert!(matches!(
            config.build(4),
            Err(DataError::InvalidSize { size: 5, n: 4 })
        ));
    }

    #[test]
    fn test_unknown_kind_is_config_error() {
        assert!(matches!(
            SamplerConfig::from_json(r#"{"kind": "weighted"}"#),
            Err(DataError::Config(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = SamplerConfig::Sequential;
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"kind":"sequential"}"#);
    }
}
