//! GeneratedOutfit: the artifact handed back to callers and persisted once
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::healing::HealingLog;
use crate::item::{Category, WardrobeItem};
use crate::runner::StageTrace;
use crate::validation::{HarmonyBreakdown, RuleClass};

/// Which path produced the outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Passed validation without repairs
    #[default]
    Primary,
    /// Repaired in the first healing round
    Fallback,
    /// Repaired in the final round, or rejected
    FinalFallback,
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationMethod::Primary => write!(f, "primary"),
            GenerationMethod::Fallback => write!(f, "fallback"),
            GenerationMethod::FinalFallback => write!(f, "final_fallback"),
        }
    }
}

/// Filter tier that produced the candidate pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterTier {
    #[default]
    Strict,
    Relaxed,
    NoRecency,
    Unfiltered,
}

impl FilterTier {
    pub const ALL: [FilterTier; 4] = [
        FilterTier::Strict,
        FilterTier::Relaxed,
        FilterTier::NoRecency,
        FilterTier::Unfiltered,
    ];
}

impl fmt::Display for FilterTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterTier::Strict => write!(f, "strict"),
            FilterTier::Relaxed => write!(f, "relaxed"),
            FilterTier::NoRecency => write!(f, "no_recency"),
            FilterTier::Unfiltered => write!(f, "unfiltered"),
        }
    }
}

/// A selected item with its reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub color: String,
    pub reasoning: String,
}

impl OutfitItem {
    pub fn from_item(item: &WardrobeItem, reasoning: impl Into<String>) -> Self {
        Self {
            id: item.id.clone(),
            name: if item.name.is_empty() { item.item_type.clone() } else { item.name.clone() },
            category: item.category(),
            color: item.color.clone(),
            reasoning: reasoning.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitMetadata {
    pub harmony: HarmonyBreakdown,
    pub style_compatibility: String,
    pub filter_tier: FilterTier,
    #[serde(default)]
    pub stage_trace: Vec<StageTrace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healing_log: Option<HealingLog>,
    /// Set when a requested base item could not be kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_item_dropped: Option<String>,
    /// Items withheld by the strict "no bad outfits" policy
    #[serde(default)]
    pub rejected_items: Vec<String>,
    /// Rule classes still blocking in the final validation
    #[serde(default)]
    pub failed_rules: Vec<RuleClass>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub seed: u64,
    pub engine_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOutfit {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub occasion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    pub items: Vec<OutfitItem>,
    pub item_ids: Vec<String>,
    pub reasoning: String,
    pub style_summary: String,
    pub color_harmony: String,
    #[serde(rename = "wasSuccessful")]
    pub was_successful: bool,
    #[serde(rename = "validationErrors")]
    pub validation_errors: Vec<String>,
    pub warnings: Vec<String>,
    pub confidence_score: f64,
    pub generation_method: GenerationMethod,
    pub metadata: OutfitMetadata,
    pub created_at: DateTime<Utc>,
}

impl GeneratedOutfit {
    /// Failed outfit with no items, used for input errors and unexpected failures
    pub fn failed(occasion: impl Into<String>, errors: Vec<String>, created_at: DateTime<Utc>) -> Self {
        let reasoning = match errors.first() {
            Some(first) => format!("Generation failed: {}", first),
            None => "Generation failed".to_string(),
        };
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            occasion: occasion.into(),
            style: None,
            mood: None,
            items: Vec::new(),
            item_ids: Vec::new(),
            reasoning,
            style_summary: String::new(),
            color_harmony: String::new(),
            was_successful: false,
            validation_errors: errors,
            warnings: Vec::new(),
            confidence_score: 0.0,
            generation_method: GenerationMethod::FinalFallback,
            metadata: OutfitMetadata {
                engine_version: crate::ENGINE_VERSION.to_string(),
                ..OutfitMetadata::default()
            },
            created_at,
        }
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.item_ids.iter().any(|i| i == id)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.items.iter().map(|i| i.category).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outfit_shape() {
        let outfit = GeneratedOutfit::failed("athletic", vec!["INPUT/empty wardrobe".into()], Utc::now());
        assert!(!outfit.was_successful);
        assert!(outfit.items.is_empty());
        assert_eq!(outfit.generation_method, GenerationMethod::FinalFallback);
        assert!(outfit.reasoning.contains("empty wardrobe"));
    }

    #[test]
    fn test_outfit_serializes_bookkeeping_names() {
        let outfit = GeneratedOutfit::failed("casual", vec![], Utc::now());
        let json = serde_json::to_value(&outfit).unwrap();
        assert_eq!(json["wasSuccessful"], serde_json::json!(false));
        assert!(json.get("validationErrors").is_some());
        assert_eq!(json["generation_method"], serde_json::json!("final_fallback"));
    }
}
