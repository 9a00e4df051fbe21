//! Context Assembler: resolves a raw request into a [`GenerationContext`]
use chrono::{Duration, Utc};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

use wardrobe_core::text::normalize_key;
use wardrobe_core::{
    Category, GenerationContext, GenerationRequest, LayeringRule, OccasionRule, TargetCounts,
    WardrobeError,
};

use crate::tables::RuleTables;

/// Default recency window in days
pub const DEFAULT_RECENCY_DAYS: i64 = 7;

pub struct ContextAssembler {
    tables: Arc<RuleTables>,
    recency_days: i64,
}

impl ContextAssembler {
    pub fn new(tables: Arc<RuleTables>) -> Self {
        Self {
            tables,
            recency_days: DEFAULT_RECENCY_DAYS,
        }
    }

    pub fn with_recency_days(mut self, days: i64) -> Self {
        self.recency_days = days.max(0);
        self
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn assemble(&self, request: &GenerationRequest) -> Result<GenerationContext, WardrobeError> {
        let occasion = normalize_key(&request.occasion);
        let occasion_rule = self.tables.occasion(&occasion)?.clone();
        let layering_rule = self.tables.layering_for(request.weather.temperature)?.clone();
        let condition_rules = self
            .tables
            .conditions_for(&request.weather)
            .into_iter()
            .cloned()
            .collect();

        let style = request
            .style
            .as_deref()
            .map(normalize_key)
            .filter(|s| !s.is_empty());
        let style_rule = style.as_deref().and_then(|s| self.tables.style(s)).cloned();
        if let (Some(style), None) = (&style, &style_rule) {
            tracing::debug!(style = %style, "unknown style, not filtering on style");
        }

        let mood = request
            .mood
            .as_deref()
            .map(normalize_key)
            .filter(|m| !m.is_empty());
        let mood_rule = mood.as_deref().and_then(|m| self.tables.mood(m)).cloned();
        if let (Some(mood), None) = (&mood, &mood_rule) {
            tracing::debug!(mood = %mood, "unknown mood, not filtering on mood");
        }

        let base_item = match request.base_item_id.as_deref() {
            Some(id) => {
                let found = request.wardrobe.iter().find(|i| i.id == id).cloned();
                if found.is_none() {
                    tracing::warn!(base_item_id = %id, "base item not in wardrobe, ignoring");
                }
                found
            }
            None => None,
        };

        let now = request.now.unwrap_or_else(Utc::now);
        let mut recent_item_ids = self.recent_items(request, now);
        if let Some(base) = &base_item {
            recent_item_ids.remove(&base.id);
        }

        let targets = target_counts(&occasion_rule, &layering_rule);
        let seed = request.seed.unwrap_or_else(|| rand::rng().random());

        tracing::debug!(
            occasion = %occasion,
            rule = %occasion_rule.key,
            band = %layering_rule.name,
            min_items = targets.min_items,
            max_items = targets.max_items,
            recent = recent_item_ids.len(),
            "context assembled"
        );

        Ok(GenerationContext {
            occasion,
            occasion_rule,
            weather: request.weather.clone(),
            layering_rule,
            condition_rules,
            style,
            style_rule,
            mood,
            mood_rule,
            profile: request.user_profile.clone(),
            base_item,
            targets,
            recent_item_ids,
            now,
            seed,
        })
    }

    /// Items worn inside the recency window, from history and `lastWorn`
    fn recent_items(&self, request: &GenerationRequest, now: chrono::DateTime<Utc>) -> HashSet<String> {
        let cutoff = now - Duration::days(self.recency_days);

        let from_history = request
            .outfit_history
            .iter()
            .filter(|entry| entry.worn_at >= cutoff && entry.worn_at <= now)
            .flat_map(|entry| entry.item_ids.iter().cloned());

        let from_items = request
            .wardrobe
            .iter()
            .filter(|item| item.last_worn.map_or(false, |worn| worn >= cutoff && worn <= now))
            .map(|item| item.id.clone());

        from_history.chain(from_items).collect()
    }
}

/// Item bounds from the occasion category; required categories always include the core three
pub fn target_counts(rule: &OccasionRule, band: &LayeringRule) -> TargetCounts {
    let (min_items, max_items) = rule.category.item_bounds();

    let mut required = vec![Category::Top, Category::Bottom, Category::Shoes];
    for category in &rule.required_categories {
        if !required.contains(category) {
            required.push(*category);
        }
    }
    if band.requires_outerwear && !required.contains(&Category::Outerwear) {
        required.push(Category::Outerwear);
    }

    TargetCounts {
        min_items,
        max_items: max_items.max(required.len()),
        required_categories: required,
    }
}
