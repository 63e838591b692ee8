//! The mutable pool of known values for one resolution.

use crate::tag::Tag;
use crate::traits::ValueSource;
use serde::{Deserialize, Serialize};

/// A single known quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaggedValue {
    pub tag: Tag,
    pub value: f64,
}

impl TaggedValue {
    pub fn new(tag: Tag, value: f64) -> Self {
        Self { tag, value }
    }
}

impl From<(Tag, f64)> for TaggedValue {
    fn from((tag, value): (Tag, f64)) -> Self {
        Self { tag, value }
    }
}

/// Ordered collection of tagged values holding at most one entry per tag.
///
/// Lookups are linear; working sets hold a few dozen values at most.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    values: Vec<TaggedValue>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Builds a working set from known values. A tag given twice keeps the later value.
    pub fn from_known<I, V>(known: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<TaggedValue>,
    {
        let mut set = Self::new();
        for value in known {
            let TaggedValue { tag, value } = value.into();
            set.insert(tag, value);
        }
        set
    }

    /// Overwrites the value for `tag` if present, appends it otherwise.
    pub fn insert(&mut self, tag: Tag, value: f64) {
        match self.values.iter_mut().find(|tv| tv.tag == tag) {
            Some(existing) => existing.value = value,
            None => self.values.push(TaggedValue { tag, value }),
        }
    }

    pub fn get(&self, tag: Tag) -> Option<f64> {
        self.values.iter().find(|tv| tv.tag == tag).map(|tv| tv.value)
    }

    pub fn has(&self, tag: Tag) -> bool {
        self.values.iter().any(|tv| tv.tag == tag)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<f64> {
        let idx = self.values.iter().position(|tv| tv.tag == tag)?;
        Some(self.values.remove(idx).value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TaggedValue> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<TaggedValue> {
        self.values
    }
}

impl ValueSource for WorkingSet {
    fn lookup(&self, tag: Tag) -> Option<f64> {
        self.get(tag)
    }

    fn contains(&self, tag: Tag) -> bool {
        self.has(tag)
    }
}
