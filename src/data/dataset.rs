// --- Файл: src/data/dataset.rs ---

//! The `Dataset` trait and its in-memory implementations.

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::{ArrayD, Axis, IxDyn};
use rand::seq::SliceRandom;

use super::error::{DataError, Result};
use super::sampler::make_rng;

/// How a dataset addresses its samples.
///
/// The loader uses this to pick a default sampler: sequenced data is walked in
/// order, keyed data is visited in a random order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Positions map directly onto an ordered sequence.
    Sequenced,
    /// Positions map onto a key order frozen at construction.
    Keyed,
}

/// An index-addressable collection of samples sharing one element type.
///
/// A dataset is never mutated after construction, so it can be read from
/// several loaders at once.
pub trait Dataset: Send + Sync {
    /// Type of a single sample.
    type Item;

    /// Number of samples.
    fn len(&self) -> usize;

    /// Whether the dataset holds no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sample at `index`, or `OutOfRange` when `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Name of the element type, as reported to batch assembly.
    fn element_type(&self) -> &'static str {
        std::any::type_name::<Self::Item>()
    }

    fn kind(&self) -> DatasetKind {
        DatasetKind::Sequenced
    }
}

impl<D: Dataset + ?Sized> Dataset for &D {
    type Item = D::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        (**self).get(index)
    }

    fn element_type(&self) -> &'static str {
        (**self).element_type()
    }

    fn kind(&self) -> DatasetKind {
        (**self).kind()
    }
}

fn out_of_range(index: usize, len: usize) -> DataError {
    DataError::OutOfRange { index, len }
}

/// Dataset backed by an ordered `Vec<T>`; position `i` yields the `i`-th element.
#[derive(Debug, Clone, PartialEq)]
pub struct VecDataset<T> {
    items: Vec<T>,
}

impl<T: Clone + Send + Sync> VecDataset<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Borrows the underlying samples.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone + Send + Sync> From<Vec<T>> for VecDataset<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Clone + Send + Sync> FromIterator<T> for VecDataset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Clone + Send + Sync> Dataset for VecDataset<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.items
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_range(index, self.items.len()))
    }
}

/// Dataset backed by string-keyed values.
///
/// The order in which the source yields its entries is captured once and
/// becomes the position-to-key mapping. Building twice from a `HashMap` may
/// therefore produce two different orders. A key that repeats keeps its first
/// position and its last value.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedDataset<T> {
    entries: Vec<(String, T)>,
    positions: HashMap<String, usize>,
}

impl<T: Clone + Send + Sync> KeyedDataset<T> {
    /// Freezes the iteration order of `entries`.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let mut frozen: Vec<(String, T)> = Vec::new();
        let mut positions = HashMap::new();

        for (key, value) in entries {
            let key = key.into();
            match positions.get(&key).copied() {
                Some(pos) => frozen[pos] = (key, value),
                None => {
                    positions.insert(key.clone(), frozen.len());
                    frozen.push((key, value));
                }
            }
        }

        Self {
            entries: frozen,
            positions,
        }
    }

    /// Key stored at position `index`.
    pub fn key(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(|(k, _)| k.as_str())
            .ok_or_else(|| out_of_range(index, self.entries.len()))
    }

    /// Keys in frozen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Looks a value up by key rather than position.
    pub fn get_by_key(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }
}

impl<T: Clone + Send + Sync> Dataset for KeyedDataset<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.entries
            .get(index)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| out_of_range(index, self.entries.len()))
    }

    fn kind(&self) -> DatasetKind {
        DatasetKind::Keyed
    }
}

/// Dataset over the rows (axis 0) of an `ndarray` feature array.
#[derive(Debug, Clone)]
pub struct ArrayDataset {
    features: Arc<ArrayD<f32>>,
    num_samples: usize,
}

impl ArrayDataset {
    /// Wraps an array of shape `[num_samples, ...]`.
    ///
    /// A zero-dimensional array has no sample axis and is rejected.
    pub fn new(features: ArrayD<f32>) -> Result<Self> {
        if features.ndim() == 0 {
            return Err(DataError::InvalidKind {
                found: "0-dimensional array".to_string(),
            });
        }
        let num_samples = features.shape()[0];
        Ok(Self {
            features: Arc::new(features),
            num_samples,
        })
    }

    /// Shape of one sample (without the sample axis).
    pub fn sample_shape(&self) -> Vec<usize> {
        self.features.shape()[1..].to_vec()
    }

    /// Stacks the rows at `indices` into an array of shape `[indices.len(), ...]`.
    pub fn get_batch(&self, indices: &[usize]) -> Result<ArrayD<f32>> {
        let mut batch_shape = vec![indices.len()];
        batch_shape.extend(self.sample_shape());

        let mut batch = ArrayD::zeros(IxDyn(&batch_shape));
        for (i, &idx) in indices.iter().enumerate() {
            if idx >= self.num_samples {
                return Err(out_of_range(idx, self.num_samples));
            }
            let row = self.features.index_axis(Axis(0), idx);
            batch.index_axis_mut(Axis(0), i).assign(&row);
        }
        Ok(batch)
    }
}

impl Dataset for ArrayDataset {
    type Item = ArrayD<f32>;

    fn len(&self) -> usize {
        self.num_samples
    }

    fn get(&self, index: usize) -> Result<ArrayD<f32>> {
        if index >= self.num_samples {
            return Err(out_of_range(index, self.num_samples));
        }
        Ok(self.features.index_axis(Axis(0), index).to_owned())
    }
}

/// A view over selected positions of another dataset.
///
/// Typically built from the train or test half of a [`Fold`](super::kfold::Fold).
pub struct SubsetDataset<D: Dataset> {
    inner: D,
    indices: Vec<usize>,
}

impl<D: Dataset> SubsetDataset<D> {
    /// Fails with `OutOfRange` if any index falls outside `dataset`.
    pub fn new(dataset: D, indices: Vec<usize>) -> Result<Self> {
        let len = dataset.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(out_of_range(bad, len));
        }
        Ok(Self {
            inner: dataset,
            indices,
        })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D: Dataset> Dataset for SubsetDataset<D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        let actual = *self
            .indices
            .get(index)
            .ok_or_else(|| out_of_range(index, self.indices.len()))?;
        self.inner.get(actual)
    }

    fn kind(&self) -> DatasetKind {
        self.inner.kind()
    }
}

/// Applies a function to every sample as it is fetched.
pub struct MapDataset<D, F> {
    inner: D,
    transform: F,
}

impl<D, F, U> MapDataset<D, F>
where
    D: Dataset,
    F: Fn(D::Item) -> U + Send + Sync,
{
    pub fn new(dataset: D, transform: F) -> Self {
        Self {
            inner: dataset,
            transform,
        }
    }
}

impl<D, F, U> Dataset for MapDataset<D, F>
where
    D: Dataset,
    F: Fn(D::Item) -> U + Send + Sync,
{
    type Item = U;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Result<U> {
        self.inner.get(index).map(&self.transform)
    }

    fn kind(&self) -> DatasetKind {
        self.inner.kind()
    }
}

/// Splits the index range `[0, n)` into train and test indices.
///
/// The first `floor(n * train_ratio)` positions (after an optional shuffle)
/// go to the train side. Both halves can feed a
/// [`SubsetSampler`](super::sampler::SubsetSampler) directly.
pub fn train_test_split(
    n: usize,
    train_ratio: f32,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..=1.0).contains(&train_ratio) {
        return Err(DataError::Config(format!(
            "train_ratio must be in [0, 1], got {train_ratio}"
        )));
    }

    let train_size = (n as f32 * train_ratio) as usize;

    let mut indices: Vec<usize> = (0..n).collect();
    if shuffle {
        indices.shuffle(&mut make_rng(seed));
    }

    let test_indices = indices.split_off(train_size);
    Ok((indices, test_indices))
}

/// Splits a dataset into train and test views with [`train_test_split`].
///
/// Pass a cheap handle such as `&dataset` to keep the original.
pub fn split_dataset<D>(
    dataset: D,
    train_ratio: f32,
    shuffle: bool,
    seed: Option<u64>,
) -> Result<(SubsetDataset<D>, SubsetDataset<D>)>
where
    D: Dataset + Clone,
{
    let (train, test) = train_test_split(dataset.len(), train_ratio, shuffle, seed)?;
    Ok((
        SubsetDataset::new(dataset.clone(), train)?,
        SubsetDataset::new(dataset, test)?,
    ))
}
