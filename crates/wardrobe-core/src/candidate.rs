//! CandidateSet: the working list of items between stages
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::item::{Category, WardrobeItem};

/// Ordered item list with unique ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    items: Vec<WardrobeItem>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, keeping the first occurrence of each id
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = WardrobeItem>,
    {
        let mut set = Self::new();
        for item in items {
            set.push(item);
        }
        set
    }

    /// Append unless the id is already present
    pub fn push(&mut self, item: WardrobeItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Put an item at the front (used for the base item)
    pub fn push_front(&mut self, item: WardrobeItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.insert(0, item);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<WardrobeItem> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Swap an item in place, keeping its position
    pub fn replace(&mut self, id: &str, replacement: WardrobeItem) -> bool {
        if replacement.id != id && self.contains(&replacement.id) {
            return false;
        }
        match self.items.iter().position(|i| i.id == id) {
            Some(idx) => {
                self.items[idx] = replacement;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WardrobeItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[WardrobeItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<WardrobeItem> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WardrobeItem> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn of_category(&self, category: Category) -> Vec<&WardrobeItem> {
        self.items.iter().filter(|i| i.category() == category).collect()
    }

    pub fn count_category(&self, category: Category) -> usize {
        self.items.iter().filter(|i| i.category() == category).count()
    }

    /// Item counts per category
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Categories covered, one-pieces counting as top and bottom
    pub fn covered_categories(&self) -> HashSet<Category> {
        self.items
            .iter()
            .flat_map(|i| i.category().covers().iter().copied())
            .collect()
    }

    /// Required categories not yet covered, in the order given
    pub fn missing(&self, required: &[Category]) -> Vec<Category> {
        let covered = self.covered_categories();
        required.iter().copied().filter(|c| !covered.contains(c)).collect()
    }

    /// Layer and outerwear pieces
    pub fn layer_count(&self) -> usize {
        self.items.iter().filter(|i| i.category().is_layering()).count()
    }

    /// First id that appears more than once
    pub fn find_duplicate_id(&self) -> Option<String> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .find(|i| !seen.insert(i.id.as_str()))
            .map(|i| i.id.clone())
    }

    /// blake3 over the ordered id list
    pub fn fingerprint(&self) -> String {
        let joined = self.ids().join("\n");
        format!("blake3:{}", blake3::hash(joined.as_bytes()))
    }

    /// Items satisfying a predicate, as a new set
    pub fn filtered<F>(&self, mut keep: F) -> CandidateSet
    where
        F: FnMut(&WardrobeItem) -> bool,
    {
        CandidateSet {
            items: self.items.iter().filter(|i| keep(*i)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a WardrobeItem;
    type IntoIter = std::slice::Iter<'a, WardrobeItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
