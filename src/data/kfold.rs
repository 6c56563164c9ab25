// --- Файл: src/data/kfold.rs ---

//! K-fold partitioning of an index range for cross-validation.

use log::debug;
use rand::seq::SliceRandom;

use super::config::KFoldOptions;
use super::error::{DataError, Result};
use super::sampler::{make_rng, SubsetSampler};

/// One train/test partition produced by [`KFold::split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Fold {
    /// A sampler replaying the train indices in fold order.
    pub fn train_sampler(&self, batch_size: usize) -> Result<SubsetSampler> {
        SubsetSampler::new(self.train.clone()).with_batch_size(batch_size)
    }

    /// A sampler replaying the test indices in fold order.
    pub fn test_sampler(&self, batch_size: usize) -> Result<SubsetSampler> {
        SubsetSampler::new(self.test.clone()).with_batch_size(batch_size)
    }
}

/// Splits `[0, n)` into `n_folds` train/test folds.
///
/// Only `n - n % n_folds` indices take part in a split, so every fold has a
/// test part of exactly `n / n_folds` indices. Which indices are left out is
/// random and changes on every call; with `shuffle` off the participating
/// indices are then sorted before being cut into folds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KFold {
    n: usize,
    n_folds: usize,
    shuffle: bool,
    seed: Option<u64>,
}

impl KFold {
    /// Fails with `InvalidFoldCount` unless `2 <= n_folds <= n`.
    pub fn new(n: usize, n_folds: usize, shuffle: bool) -> Result<Self> {
        if n_folds < 2 || n_folds > n {
            return Err(DataError::InvalidFoldCount { n_folds, n });
        }
        Ok(Self {
            n,
            n_folds,
            shuffle,
            seed: None,
        })
    }

    pub fn with_options(n: usize, options: KFoldOptions) -> Result<Self> {
        let mut kfold = Self::new(n, options.n_folds, options.shuffle)?;
        kfold.seed = options.seed;
        Ok(kfold)
    }

    /// Fixes the seed so every `split()` returns the same folds.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keeps the permuted order instead of sorting the sampled indices.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    /// Test-part size shared by every fold.
    pub fn fold_size(&self) -> usize {
        self.n / self.n_folds
    }

    pub fn split(&self) -> Vec<Fold> {
        let fold_size = self.fold_size();
        let n_samples = fold_size * self.n_folds;

        let mut indices: Vec<usize> = (0..self.n).collect();
        indices.shuffle(&mut make_rng(self.seed));
        indices.truncate(n_samples);
        if !self.shuffle {
            indices.sort_unstable();
        }

        let folds: Vec<Fold> = (0..self.n_folds)
            .map(|f| {
                let start = f * fold_size;
                let end = start + fold_size;
                Fold {
                    train: indices[..start]
                        .iter()
                        .chain(&indices[end..])
                        .copied()
                        .collect(),
                    test: indices[start..end].to_vec(),
                }
            })
            .collect();

        debug!(
            "KFold: {} folds of {} test indices ({} of {} used, shuffle={})",
            self.n_folds, fold_size, n_samples, self.n, self.shuffle
        );
        folds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_kfold_sizes() {
        let folds = KFold::new(11, 3, true).unwrap().split();
        assert_eq!(folds.len(), 3);
        for fold in &folds {
            assert_eq!(fold.train.len(), 6);
            assert_eq!(fold.test.len(), 3);
        }
    }

    #[test]
    fn test_kfold_disjoint_and_covering() {
        let kfold = KFold::new(23, 4, false).unwrap();
        let folds = kfold.split();

        let mut all_tests = HashSet::new();
        for fold in &folds {
            let train: HashSet<_> = fold.train.iter().copied().collect();
            assert!(fold.test.iter().all(|i| !train.contains(i)));
            all_tests.extend(fold.test.iter().copied());
        }
        assert_eq!(all_tests.len(), 4 * 5);

        // Three of the 23 indices are dropped at random; the rest stay sorted.
        let joined: Vec<usize> = folds.iter().flat_map(|f| f.test.clone()).collect();
        assert!(joined.windows(2).all(|w| w[0] < w[1]));

        // Every fold covers the same reference set.
        let reference: HashSet<_> = folds[0].train.iter().chain(&folds[0].test).collect();
        for fold in &folds[1..] {
            let set: HashSet<_> = fold.train.iter().chain(&fold.test).collect();
            assert_eq!(set, reference);
        }
    }

    #[test]
    fn test_kfold_unshuffled_is_sorted() {
        let folds = KFold::new(10, 5, false).unwrap().seed(9).split();
        let joined: Vec<usize> = folds.iter().flat_map(|f| f.test.clone()).collect();
        assert!(joined.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(joined, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_kfold_seeded_is_reproducible() {
        let kfold = KFold::new(30, 3, true).unwrap().seed(5);
        assert_eq!(kfold.split(), kfold.split());
    }

    #[test]
    fn test_kfold_invalid_fold_count() {
        assert_eq!(
            KFold::new(10, 1, false),
            Err(DataError::InvalidFoldCount { n_folds: 1, n: 10 })
        );
        assert!(KFold::new(3, 4, false).is_err());
        assert!(KFold::new(4, 4, false).is_ok());
    }

    #[test]
    fn test_kfold_shuffle_setter_matches_options() {
        let options = KFoldOptions {
            n_folds: 4,
            shuffle: true,
            seed: Some(21),
        };
        let from_options = KFold::with_options(18, options).unwrap();
        let from_setters = KFold::new(18, 4, false).unwrap().shuffle(true).seed(21);
        assert_eq!(from_setters, from_options);
        assert_eq!(from_setters.split(), from_options.split());
    }

    #[test]
    fn test_kfold_options() {
        let kfold = KFold::with_options(20, KFoldOptions::default()).unwrap();
        assert_eq!(kfold.n_folds(), 5);
        assert_eq!(kfold.fold_size(), 4);
    }

    #[test]
    fn test_fold_samplers() {
        let fold = Fold {
            train: vec![0, 1, 2, 3],
            test: vec![4, 5],
        };
        let sampler = fold.train_sampler(2).unwrap();
        assert_eq!(crate::data::Sampler::sample(&sampler), vec![0, 1, 2, 3]);
        assert!(fold.test_sampler(3).is_err());
    }
}
