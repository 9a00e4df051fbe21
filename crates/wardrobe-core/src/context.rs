//! Generation Context: immutable per-request state read by every stage
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::data_model::{UserProfile, Weather};
use crate::item::{Category, WardrobeItem};
use crate::rules::{ConditionRule, LayeringRule, MoodRule, OccasionRule, StyleRule};

/// Item-count bounds and required category coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCounts {
    pub min_items: usize,
    pub max_items: usize,
    /// Always contains Top, Bottom and Shoes
    pub required_categories: Vec<Category>,
}

impl TargetCounts {
    pub fn contains_count(&self, count: usize) -> bool {
        count >= self.min_items && count <= self.max_items
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationContext {
    /// Occasion as requested, normalized
    pub occasion: String,
    pub occasion_rule: OccasionRule,
    pub weather: Weather,
    pub layering_rule: LayeringRule,
    pub condition_rules: Vec<ConditionRule>,
    pub style: Option<String>,
    pub style_rule: Option<StyleRule>,
    pub mood: Option<String>,
    pub mood_rule: Option<MoodRule>,
    pub profile: UserProfile,
    pub base_item: Option<WardrobeItem>,
    pub targets: TargetCounts,
    /// Snapshot of items worn inside the recency window
    pub recent_item_ids: HashSet<String>,
    pub now: DateTime<Utc>,
    pub seed: u64,
}

impl GenerationContext {
    pub fn is_base(&self, item_id: &str) -> bool {
        self.base_item.as_ref().map_or(false, |b| b.id == item_id)
    }

    pub fn base_id(&self) -> Option<&str> {
        self.base_item.as_ref().map(|b| b.id.as_str())
    }

    pub fn required_categories(&self) -> &[Category] {
        &self.targets.required_categories
    }

    pub fn is_cold(&self) -> bool {
        self.weather.is_cold()
    }

    pub fn is_formal(&self) -> bool {
        self.occasion_rule.is_formal()
    }

    pub fn formality(&self) -> u8 {
        self.occasion_rule.formality
    }

    /// Weather keyword hit from the temperature band or an active condition
    pub fn weather_forbidden_hit(&self, item: &WardrobeItem) -> Option<String> {
        self.layering_rule
            .forbidden_hit(item)
            .or_else(|| self.condition_rules.iter().find_map(|c| c.forbidden_hit(item)))
    }
}
