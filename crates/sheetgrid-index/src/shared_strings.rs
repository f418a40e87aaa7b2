use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IndexError, Result};

/// Deduplicating string table with bidirectional index↔value lookup.
///
/// Indices are assigned densely from 0 in first-seen order and never
/// reused; removal is not supported.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SharedStringTable {
    values: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, u32>,
}

impl SharedStringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a pre-existing list of strings, deduplicating as it goes.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for value in values {
            table.add(value);
        }
        table
    }

    /// Insert (or reuse) a string, returning its index.
    ///
    /// Re-adding an existing string returns its existing index and leaves
    /// the counts untouched.
    pub fn add(&mut self, value: impl Into<String>) -> u32 {
        let value = value.into();
        if let Some(&existing) = self.index.get(&value) {
            return existing;
        }
        let assigned = self.values.len() as u32;
        self.values.push(value.clone());
        self.index.insert(value, assigned);
        assigned
    }

    /// Apply [`add`](Self::add) to each element in order, collecting the
    /// returned indices. Eager: the side effects happen even if the result
    /// is discarded.
    pub fn add_all<I, S>(&mut self, values: I) -> Vec<u32>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(|v| self.add(v)).collect()
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    pub fn contains_index(&self, index: u32) -> bool {
        (index as usize) < self.values.len()
    }

    /// Exact-key lookup by index; errors when absent (unlike the boolean
    /// [`contains_index`](Self::contains_index)).
    pub fn get(&self, index: u32) -> Result<&str> {
        self.values
            .get(index as usize)
            .map(String::as_str)
            .ok_or(IndexError::IndexNotFound(index))
    }

    /// Exact-key lookup by value; errors when absent.
    pub fn index_of(&self, value: &str) -> Result<u32> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| IndexError::StringNotFound(value.to_string()))
    }

    /// Total number of stored entries. Removal is unsupported, so this
    /// always equals [`unique_count`](Self::unique_count).
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Number of distinct strings stored.
    pub fn unique_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The stored strings in index order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for SharedStringTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            values: Vec<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(Self::from_values(helper.values))
    }
}
