// --- Файл: src/data/dynamic.rs ---

//! Datasets whose shape is only known at runtime, read from JSON values.

use serde_json::Value;

use super::dataset::{Dataset, DatasetKind, KeyedDataset, VecDataset};
use super::error::{DataError, Result};

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

/// A dataset of JSON values: either a sequence or a string-keyed mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicDataset {
    Sequenced(VecDataset<Value>),
    Keyed(KeyedDataset<Value>),
}

impl DynamicDataset {
    /// An array becomes a sequenced dataset and an object a keyed one.
    ///
    /// Object keys are frozen in the order `serde_json` iterates them.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(DynamicDataset::Sequenced(VecDataset::new(items))),
            Value::Object(map) => Ok(DynamicDataset::Keyed(KeyedDataset::new(map))),
            other => Err(DataError::InvalidKind {
                found: describe(&other),
            }),
        }
    }

    /// Builds a keyed dataset from an array of `[key, value]` entries, keeping
    /// the entries' order.
    pub fn keyed_from_entries(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Array(entries) => entries,
            other => {
                return Err(DataError::InvalidKind {
                    found: describe(&other),
                })
            }
        };

        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let (key, value) = match entry {
                Value::Array(mut pair) if pair.len() == 2 => {
                    let value = pair.pop().unwrap_or(Value::Null);
                    let key = pair.pop().unwrap_or(Value::Null);
                    (key, value)
                }
                other => {
                    return Err(DataError::InvalidKind {
                        found: format!("{} entry", describe(&other)),
                    })
                }
            };
            match key {
                Value::String(key) => pairs.push((key, value)),
                other => {
                    return Err(DataError::InvalidKeyType {
                        found: describe(&other),
                    })
                }
            }
        }
        Ok(DynamicDataset::Keyed(KeyedDataset::new(pairs)))
    }
}

impl Dataset for DynamicDataset {
    type Item = Value;

    fn len(&self) -> usize {
        match self {
            DynamicDataset::Sequenced(ds) => ds.len(),
            DynamicDataset::Keyed(ds) => ds.len(),
        }
    }

    fn get(&self, index: usize) -> Result<Value> {
        match self {
            DynamicDataset::Sequenced(ds) => ds.get(index),
            DynamicDataset::Keyed(ds) => ds.get(index),
        }
    }

    fn kind(&self) -> DatasetKind {
        match self {
            DynamicDataset::Sequenced(_) => DatasetKind::Sequenced,
            DynamicDataset::Keyed(_) => DatasetKind::Keyed,
        }
    }
}
