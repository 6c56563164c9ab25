// --- Файл: src/data/dataloader.rs ---

//! DataLoader - a cursor over a dataset driven by a sampler's index sequence.

use log::{debug, trace};

use super::dataset::{Dataset, DatasetKind};
use super::error::{DataError, Result};
use super::sampler::{RandomSampler, Sampler, SequentialSampler};

/// What one loader step returns.
///
/// A batch size of one yields bare samples; larger batch sizes yield batches,
/// the last of which may be short.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Sample(T),
    Batch(Vec<T>),
}

impl<T> Fetched<T> {
    /// Number of samples carried by this step.
    pub fn len(&self) -> usize {
        match self {
            Fetched::Sample(_) => 1,
            Fetched::Batch(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the step into a vector of samples.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Fetched::Sample(item) => vec![item],
            Fetched::Batch(items) => items,
        }
    }

    pub fn into_sample(self) -> Option<T> {
        match self {
            Fetched::Sample(item) => Some(item),
            Fetched::Batch(_) => None,
        }
    }
}

/// Iterates a dataset in the order fixed by a sampler.
///
/// The sampler is consulted exactly once, at construction; its index sequence
/// and batch size are captured and reused by every pass after [`reset`](Self::reset).
///
/// [`try_next`](Self::try_next) leaves the cursor untouched when a fetch fails,
/// so the same step can be retried. The `Iterator` impl instead yields the
/// error once and ends the pass; call `reset` to iterate again.
///
/// # Example
///
/// ```
/// use rustyloader::data::{BatchSampler, DataLoader, Dataset, Fetched, VecDataset};
///
/// let dataset = VecDataset::new(vec![10, 20, 30, 40, 50]);
/// let sampler = BatchSampler::new(dataset.len(), 2, false).unwrap();
/// let mut loader = DataLoader::with_sampler(&dataset, &sampler);
///
/// assert_eq!(loader.try_next().unwrap(), Fetched::Batch(vec![10, 20]));
/// assert_eq!(loader.num_batches(), 3);
/// ```
pub struct DataLoader<'a, D: Dataset + ?Sized> {
    dataset: &'a D,
    indices: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl<'a, D: Dataset + ?Sized> DataLoader<'a, D> {
    /// Uses the default sampler for the dataset's kind: sequential order for
    /// sequenced data, a random permutation for keyed data.
    pub fn new(dataset: &'a D) -> Self {
        match dataset.kind() {
            DatasetKind::Sequenced => {
                Self::with_sampler(dataset, &SequentialSampler::new(dataset.len()))
            }
            DatasetKind::Keyed => Self::with_sampler(dataset, &RandomSampler::new(dataset.len())),
        }
    }

    pub fn with_sampler<S: Sampler + ?Sized>(dataset: &'a D, sampler: &S) -> Self {
        let indices = sampler.sample();
        let batch_size = sampler.batch_size().max(1);
        debug!(
            "DataLoader: {} indices over {} samples of {}, batch size {}",
            indices.len(),
            dataset.len(),
            dataset.element_type(),
            batch_size
        );
        Self {
            dataset,
            indices,
            batch_size,
            cursor: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.indices.len()
    }

    /// Fetches the next sample or batch and advances the cursor.
    ///
    /// Fails with `Exhausted` once every index has been consumed. If a fetch
    /// fails the cursor stays where it was.
    pub fn try_next(&mut self) -> Result<Fetched<D::Item>> {
        if !self.has_next() {
            return Err(DataError::Exhausted);
        }

        if self.batch_size == 1 {
            let item = self.dataset.get(self.indices[self.cursor])?;
            self.cursor += 1;
            trace!("DataLoader: cursor -> {}", self.cursor);
            return Ok(Fetched::Sample(item));
        }

        let end = (self.cursor + self.batch_size).min(self.indices.len());
        let batch = self.indices[self.cursor..end]
            .iter()
            .map(|&idx| self.dataset.get(idx))
            .collect::<Result<Vec<_>>>()?;
        self.cursor = end;
        trace!("DataLoader: cursor -> {}", self.cursor);
        Ok(Fetched::Batch(batch))
    }

    /// Rewinds to the start of the captured index sequence.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The index sequence captured from the sampler.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Indices not yet consumed in the current pass.
    pub fn remaining(&self) -> usize {
        self.indices.len() - self.cursor
    }

    /// Steps in one full pass.
    pub fn num_batches(&self) -> usize {
        self.indices.len().div_ceil(self.batch_size)
    }

    pub fn dataset(&self) -> &'a D {
        self.dataset
    }
}

impl<D: Dataset + ?Sized> Iterator for DataLoader<'_, D> {
    type Item = Result<Fetched<D::Item>>;

    /// Yields steps until the pass is over. A failed fetch is yielded once
    /// and ends the pass.
    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let step = self.try_next();
        if step.is_err() {
            self.cursor = self.indices.len();
        }
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let steps = self.remaining().div_ceil(self.batch_size);
        (steps, Some(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{KeyedDataset, VecDataset};
    use crate::data::sampler::{BatchSampler, SubsetSampler};

    fn create_test_dataset() -> VecDataset<i32> {
        VecDataset::new(vec![100, 1, 2, 3, 4, 5, 6, 7, 8, 9])
    }

    #[test]
    fn test_dataloader_default_sequential() {
        let dataset = create_test_dataset();
        let mut loader = DataLoader::new(&dataset);

        assert_eq!(loader.batch_size(), 1);
        assert_eq!(loader.try_next(), Ok(Fetched::Sample(100)));
        for _ in 0..9 {
            assert!(loader.try_next().is_ok());
        }
        assert!(!loader.has_next());
        assert_eq!(loader.try_next(), Err(DataError::Exhausted));
        assert_eq!(loader.cursor(), 10);
    }

    #[test]
    fn test_dataloader_batches_with_short_tail() {
        let dataset = create_test_dataset();
        let sampler = BatchSampler::new(dataset.len(), 3, false).unwrap();
        let loader = DataLoader::with_sampler(&dataset, &sampler);

        assert_eq!(loader.num_batches(), 4);
        let batches: Vec<_> = loader.map(|b| b.unwrap().into_vec()).collect();
        assert_eq!(batches.len(), 4);
        assert_eq!(batches[0], vec![100, 1, 2]);
        assert_eq!(batches[3], vec![9]);
    }

    #[test]
    fn test_dataloader_drop_last() {
        let dataset = create_test_dataset();
        let sampler = BatchSampler::new(dataset.len(), 3, true).unwrap();
        let loader = DataLoader::with_sampler(&dataset, &sampler);

        let sizes: Vec<usize> = loader.map(|b| b.unwrap().len()).collect();
        assert_eq!(sizes, vec![3, 3, 3]);
    }

    #[test]
    fn test_dataloader_reset_replays_sequence() {
        let dataset = create_test_dataset();
        let sampler = BatchSampler::new(dataset.len(), 4, false).unwrap().shuffle(true);
        let mut loader = DataLoader::with_sampler(&dataset, &sampler);

        let first_pass: Vec<_> = loader.by_ref().map(|b| b.unwrap()).collect();
        assert!(!loader.has_next());

        loader.reset();
        assert!(loader.has_next());
        let second_pass: Vec<_> = loader.by_ref().map(|b| b.unwrap()).collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_dataloader_keyed_default_is_permutation() {
        let dataset = KeyedDataset::new(vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let loader = DataLoader::new(&dataset);

        let mut indices = loader.indices().to_vec();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let mut values: Vec<i32> = loader.map(|s| s.unwrap().into_sample().unwrap()).collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_dataloader_failed_fetch_keeps_cursor() {
        let dataset = VecDataset::new(vec![1, 2]);
        let sampler = SubsetSampler::new(vec![0, 5]).with_batch_size(2).unwrap();
        let mut loader = DataLoader::with_sampler(&dataset, &sampler);

        assert_eq!(
            loader.try_next(),
            Err(DataError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(loader.cursor(), 0);
        assert!(loader.has_next());
    }

    #[test]
    fn test_dataloader_iterator_ends_pass_on_error() {
        let dataset = VecDataset::new(vec![1, 2]);
        let sampler = SubsetSampler::new(vec![5, 0]);
        let mut loader = DataLoader::with_sampler(&dataset, &sampler);

        assert_eq!(
            loader.next(),
            Some(Err(DataError::OutOfRange { index: 5, len: 2 }))
        );
        assert!(!loader.has_next());
        assert_eq!(loader.next(), None);

        loader.reset();
        assert_eq!(loader.cursor(), 0);
        assert!(loader.try_next().is_err());
        assert_eq!(loader.cursor(), 0);
    }

    #[test]
    fn test_dataloader_empty_dataset() {
        let dataset: VecDataset<i32> = VecDataset::new(Vec::new());
        let mut loader = DataLoader::new(&dataset);
        assert!(!loader.has_next());
        assert_eq!(loader.num_batches(), 0);
        assert_eq!(loader.try_next(), Err(DataError::Exhausted));
        loader.reset();
        assert!(!loader.has_next());
    }

    #[test]
    fn test_dataloader_over_trait_object() {
        let dataset = create_test_dataset();
        let dynamic: &dyn Dataset<Item = i32> = &dataset;
        let mut loader = DataLoader::new(dynamic);
        assert_eq!(loader.try_next(), Ok(Fetched::Sample(100)));
        assert_eq!(loader.size_hint(), (9, Some(9)));
    }
}
