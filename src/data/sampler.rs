// --- Файл: src/data/sampler.rs ---

//! Sampling strategies: producers of index sequences for the `DataLoader`.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::{BatchSamplerOptions, RandomSamplerOptions};
use super::error::{DataError, Result};

/// Builds the RNG for one `sample()` or `split()` call.
///
/// A fixed seed gives the same stream on every call; without one the
/// generator is seeded from the wall clock, so each call is re-randomized.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default();
            StdRng::seed_from_u64(nanos)
        }
    }
}

/// A producer of dataset indices.
///
/// `sample()` materializes a fresh sequence on every call. Values lie in
/// `[0, n)` but are not necessarily distinct, nor necessarily a permutation.
pub trait Sampler {
    /// Produces the index sequence.
    fn sample(&self) -> Vec<usize>;

    /// Number of indices one `sample()` call produces.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of samples the loader groups into one step.
    fn batch_size(&self) -> usize {
        1
    }
}

/// Yields `[0, 1, ..., n-1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialSampler {
    n: usize,
}

impl SequentialSampler {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Sampler for SequentialSampler {
    fn sample(&self) -> Vec<usize> {
        (0..self.n).collect()
    }

    fn len(&self) -> usize {
        self.n
    }
}

/// Draws indices from `[0, n)` at random.
///
/// - with replacement: `size` independent uniform draws, duplicates allowed;
/// - without replacement and `size == n`: a uniform permutation of `[0, n)`;
/// - without replacement and `size < n`: a shuffled contiguous window
///   `[high - size, high)` whose upper end is uniform over `[size, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSampler {
    n: usize,
    size: usize,
    replacement: bool,
    seed: Option<u64>,
}

impl RandomSampler {
    /// Permutation of `[0, n)` without replacement.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            size: n,
            replacement: false,
            seed: None,
        }
    }

    /// Fails with `InvalidSize` when `options.size > n`.
    pub fn with_options(n: usize, options: RandomSamplerOptions) -> Result<Self> {
        let size = options.size.unwrap_or(n);
        if size > n {
            return Err(DataError::InvalidSize { size, n });
        }
        Ok(Self {
            n,
            size,
            replacement: options.replacement,
            seed: options.seed,
        })
    }

    /// Fixes the seed so every `sample()` call returns the same sequence.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draws `size` indices instead of `n`; fails with `InvalidSize` when `size > n`.
    pub fn size(mut self, size: usize) -> Result<Self> {
        if size > self.n {
            return Err(DataError::InvalidSize { size, n: self.n });
        }
        self.size = size;
        Ok(self)
    }

    /// Draws independently, allowing duplicates.
    pub fn replacement(mut self, replacement: bool) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn is_replacement(&self) -> bool {
        self.replacement
    }
}

impl Sampler for RandomSampler {
    fn sample(&self) -> Vec<usize> {
        let mut rng = make_rng(self.seed);

        let indices: Vec<usize> = if self.replacement {
            (0..self.size).map(|_| rng.random_range(0..self.n)).collect()
        } else if self.size == self.n {
            let mut perm: Vec<usize> = (0..self.n).collect();
            perm.shuffle(&mut rng);
            perm
        } else {
            let high = rng.random_range(self.size..self.n);
            let mut window: Vec<usize> = (high - self.size..high).collect();
            window.shuffle(&mut rng);
            window
        };

        debug!(
            "RandomSampler: drew {} of {} indices (replacement={})",
            indices.len(),
            self.n,
            self.replacement
        );
        indices
    }

    fn len(&self) -> usize {
        self.size
    }
}

/// Emits a flat index stream sized for whole batches.
///
/// The stream is `[0, n)` (or a permutation of it when shuffling). With
/// `drop_last` the trailing incomplete batch is cut off. The loader re-imposes
/// the grouping through `batch_size()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSampler {
    n: usize,
    batch_size: usize,
    drop_last: bool,
    shuffle: bool,
    seed: Option<u64>,
}

impl BatchSampler {
    /// Fails with `InvalidBatchSize` unless `1 <= batch_size <= n`.
    pub fn new(n: usize, batch_size: usize, drop_last: bool) -> Result<Self> {
        if batch_size < 1 || batch_size > n {
            return Err(DataError::InvalidBatchSize { batch_size, n });
        }
        Ok(Self {
            n,
            batch_size,
            drop_last,
            shuffle: false,
            seed: None,
        })
    }

    pub fn with_options(n: usize, options: BatchSamplerOptions) -> Result<Self> {
        let mut sampler = Self::new(n, options.batch_size, options.drop_last)?;
        sampler.shuffle = options.shuffle;
        sampler.seed = options.seed;
        Ok(sampler)
    }

    /// Enables or disables shuffling of the base order.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of batches the loader will produce from one stream.
    pub fn num_batches(&self) -> usize {
        if self.drop_last {
            self.n / self.batch_size
        } else {
            self.n.div_ceil(self.batch_size)
        }
    }
}

impl Sampler for BatchSampler {
    fn sample(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.n).collect();
        if self.shuffle {
            indices.shuffle(&mut make_rng(self.seed));
        }
        indices.truncate(self.len());

        debug!(
            "BatchSampler: {} indices in {} batches of {} (shuffle={})",
            indices.len(),
            self.num_batches(),
            self.batch_size,
            self.shuffle
        );
        indices
    }

    fn len(&self) -> usize {
        if self.drop_last {
            (self.n / self.batch_size) * self.batch_size
        } else {
            self.n
        }
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// Replays an explicit list of indices, such as one side of a k-fold split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetSampler {
    indices: Vec<usize>,
    batch_size: usize,
    shuffle: bool,
    seed: Option<u64>,
}

impl SubsetSampler {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            batch_size: 1,
            shuffle: false,
            seed: None,
        }
    }

    /// Fails with `InvalidBatchSize` unless `1 <= batch_size <= indices.len()`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        let n = self.indices.len();
        if batch_size < 1 || batch_size > n {
            return Err(DataError::InvalidBatchSize { batch_size, n });
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Sampler for SubsetSampler {
    fn sample(&self) -> Vec<usize> {
        let mut indices = self.indices.clone();
        if self.shuffle {
            indices.shuffle(&mut make_rng(self.seed));
        }
        indices
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}
