//! # Data Loading Module
//!
//! Dataset, sampler and data loader API in the PyTorch style, plus k-fold
//! splitting for cross-validation.
//!
//! ## Key Components
//!
//! - [`Dataset`]: index-addressable collection of samples of one type
//! - [`Sampler`]: produces the index sequence a loader walks
//! - [`DataLoader`]: cursor yielding one sample or one batch per step
//! - [`KFold`]: train/test index partitions
//!
//! ## Example
//!
//! ```
//! use rustyloader::data::{BatchSampler, DataLoader, Dataset, KFold, VecDataset};
//!
//! let dataset: VecDataset<u32> = (0..10).collect();
//! let sampler = BatchSampler::new(dataset.len(), 4, false)
//!     .unwrap()
//!     .shuffle(true);
//!
//! let mut loader = DataLoader::with_sampler(&dataset, &sampler);
//! while loader.has_next() {
//!     let batch = loader.try_next().unwrap().into_vec();
//!     assert!(batch.len() <= 4);
//! }
//!
//! for fold in KFold::new(dataset.len(), 5, true).unwrap().split() {
//!     assert_eq!(fold.test.len(), 2);
//! }
//! ```
//!
//! ## Available Components
//!
//! ### Datasets
//! - [`VecDataset`]: ordered sequence
//! - [`KeyedDataset`]: string-keyed values with a frozen key order
//! - [`ArrayDataset`]: rows of an `ndarray` array
//! - [`DynamicDataset`]: JSON array or object
//! - [`SubsetDataset`], [`MapDataset`]: views over another dataset
//!
//! ### Samplers
//! - [`SequentialSampler`]: `0..n` in order
//! - [`RandomSampler`]: permutation, window, or draws with replacement
//! - [`BatchSampler`]: index stream sized for whole batches
//! - [`SubsetSampler`]: replays an explicit index list

pub mod config;
pub mod dataloader;
pub mod dataset;
pub mod dynamic;
pub mod error;
pub mod kfold;
pub mod sampler;

pub use config::{BatchSamplerOptions, KFoldOptions, RandomSamplerOptions, SamplerConfig};
pub use dataloader::{DataLoader, Fetched};
pub use dataset::{
    split_dataset, train_test_split, ArrayDataset, Dataset, DatasetKind, KeyedDataset, MapDataset,
    SubsetDataset, VecDataset,
};
pub use dynamic::DynamicDataset;
pub use error::{DataError, Result};
pub use kfold::{Fold, KFold};
pub use sampler::{BatchSampler, RandomSampler, Sampler, SequentialSampler, SubsetSampler};
