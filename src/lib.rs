//! # rustyloader: data iteration for training loops
//!
//! **rustyloader** wraps in-memory sample collections behind a [`Dataset`]
//! trait, produces visiting orders with [`Sampler`]s, walks them with a
//! [`DataLoader`] and partitions index ranges with [`KFold`].
//!
//! ## Usage Example
//!
//! ```
//! use rustyloader::{DataLoader, Fetched, VecDataset};
//!
//! let dataset = VecDataset::new(vec![100, 1, 2, 3]);
//! let mut loader = DataLoader::new(&dataset);
//!
//! assert_eq!(loader.try_next().unwrap(), Fetched::Sample(100));
//! loader.reset();
//! assert!(loader.has_next());
//! ```
//!
//! Logging goes through the `log` facade; install any logger to see sampler
//! and loader activity.

pub mod data;

pub use data::{
    BatchSampler, DataError, DataLoader, Dataset, Fetched, Fold, KFold, KeyedDataset,
    RandomSampler, Sampler, SequentialSampler, VecDataset,
};
