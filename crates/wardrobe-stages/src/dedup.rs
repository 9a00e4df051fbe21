//! Deduplicator: enforces per-category item limits
use std::collections::{BTreeMap, HashSet};

use wardrobe_core::{CandidateSet, Category, GenerationContext, Stage, StageEnv, StageError};

use crate::scoring::base_score;

/// Dedup never shrinks a set below this many items when essentials can be kept
pub const MIN_ITEMS_AFTER_DEDUP: usize = 3;

/// How many items of a category an outfit may hold
pub fn category_limit(category: Category, ctx: &GenerationContext) -> usize {
    match category {
        Category::Layer if ctx.is_cold() || ctx.is_formal() => 2,
        Category::Accessory if ctx.formality() >= 4 => 3,
        Category::Accessory => 2,
        _ => 1,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Deduplicator;

impl Deduplicator {
    pub fn new() -> Self {
        Self
    }

    /// Deduplicated set and the ids that were dropped
    pub fn dedup(&self, input: CandidateSet, ctx: &GenerationContext) -> (CandidateSet, Vec<String>) {
        let mut groups: BTreeMap<Category, Vec<(usize, f64, String)>> = BTreeMap::new();
        for (position, item) in input.iter().enumerate() {
            let score = if ctx.is_base(&item.id) { f64::INFINITY } else { base_score(item, ctx) };
            groups
                .entry(item.category())
                .or_default()
                .push((position, score, item.id.clone()));
        }

        // (category, score, position, id) of every item over its limit, best first
        let mut dropped: Vec<(Category, f64, usize, String)> = Vec::new();
        for (category, mut members) in groups {
            let limit = category_limit(category, ctx);
            if members.len() <= limit {
                continue;
            }
            members.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            for (position, score, id) in members.into_iter().skip(limit) {
                dropped.push((category, score, position, id));
            }
        }

        if input.len() - dropped.len() < MIN_ITEMS_AFTER_DEDUP {
            dropped.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.2.cmp(&b.2))
            });
            let mut kept_back = Vec::new();
            for (idx, (category, _, _, _)) in dropped.iter().enumerate() {
                if input.len() - (dropped.len() - kept_back.len()) >= MIN_ITEMS_AFTER_DEDUP {
                    break;
                }
                if category.is_essential() {
                    kept_back.push(idx);
                }
            }
            for idx in kept_back.into_iter().rev() {
                let (category, _, _, id) = dropped.remove(idx);
                tracing::debug!(item_id = %id, category = %category, "duplicate kept to reach minimum size");
            }
        }

        let dropped_ids: HashSet<String> = dropped.into_iter().map(|(_, _, _, id)| id).collect();
        let removed: Vec<String> = input
            .iter()
            .filter(|i| dropped_ids.contains(&i.id))
            .map(|i| i.id.clone())
            .collect();
        let kept = input.filtered(|i| !dropped_ids.contains(&i.id));

        (kept, removed)
    }
}

impl Stage for Deduplicator {
    fn id(&self) -> &'static str {
        "dedup.categories.v1"
    }

    fn run(&self, input: CandidateSet, env: &mut StageEnv<'_>) -> Result<CandidateSet, StageError> {
        let (kept, removed) = self.dedup(input, env.ctx);
        if !removed.is_empty() {
            tracing::debug!(removed = ?removed, "duplicates removed");
            env.note(format!("removed duplicates: {}", removed.join(", ")));
        }
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use wardrobe_core::{UserProfile, WardrobeItem};

    #[test]
    fn test_keeps_one_per_core_category() {
        let ctx = context("casual", 75.0, None, UserProfile::default());
        let input = CandidateSet::from_items(vec![
            WardrobeItem::new("shirt-a", "shirt", "Blue Shirt").with_wear(3, None),
            WardrobeItem::new("shirt-b", "shirt", "White Shirt").with_wear(3, None).with_favorite(1.0),
            WardrobeItem::new("pants-a", "pants", "Chinos").with_wear(3, None),
            WardrobeItem::new("pants-b", "pants", "Jeans").with_wear(3, None),
            WardrobeItem::new("shoes", "sneakers", "Sneakers"),
        ]);

        let (kept, removed) = Deduplicator::new().dedup(input, &ctx);
        assert_eq!(kept.ids(), vec!["shirt-b", "pants-a", "shoes"]);
        assert_eq!(removed, vec!["shirt-a", "pants-b"]);
    }

    #[test]
    fn test_base_item_wins_its_category() {
        let mut ctx = context("casual", 75.0, None, UserProfile::default());
        let base = WardrobeItem::new("old-shirt", "shirt", "Old Shirt").with_wear(40, None);
        ctx.base_item = Some(base.clone());
        let input = CandidateSet::from_items(vec![
            WardrobeItem::new("new-shirt", "shirt", "New Shirt").with_favorite(1.0),
            base,
            WardrobeItem::new("pants", "pants", "Pants"),
            WardrobeItem::new("shoes", "boots", "Boots"),
        ]);

        let (kept, _) = Deduplicator::new().dedup(input, &ctx);
        assert!(kept.contains("old-shirt"));
        assert!(!kept.contains("new-shirt"));
    }

    #[test]
    fn test_cold_and_formal_layer_exceptions() {
        let cold = context("casual", 40.0, None, UserProfile::default());
        let mild = context("casual", 70.0, None, UserProfile::default());
        let gala = context("gala", 70.0, None, UserProfile::default());
        assert_eq!(category_limit(Category::Layer, &cold), 2);
        assert_eq!(category_limit(Category::Layer, &mild), 1);
        assert_eq!(category_limit(Category::Layer, &gala), 2);
        assert_eq!(category_limit(Category::Accessory, &mild), 2);
        assert_eq!(category_limit(Category::Accessory, &gala), 3);
        assert_eq!(category_limit(Category::Outerwear, &cold), 1);
    }

    #[test]
    fn test_keeps_essential_duplicates_below_minimum() {
        let ctx = context("casual", 75.0, None, UserProfile::default());
        let input = CandidateSet::from_items(vec![
            WardrobeItem::new("shirt-a", "shirt", "Shirt A"),
            WardrobeItem::new("shirt-b", "shirt", "Shirt B"),
            WardrobeItem::new("shirt-c", "shirt", "Shirt C"),
        ]);

        let (kept, removed) = Deduplicator::new().dedup(input, &ctx);
        assert_eq!(kept.len(), 3);
        assert!(removed.is_empty());
    }
}
