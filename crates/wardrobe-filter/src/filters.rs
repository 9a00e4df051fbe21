//! The six item filters, in cascade order.
//!
//! A filter never sees the `Unfiltered` tier; the cascade skips filtering
//! entirely there.

use std::sync::Arc;

use wardrobe_core::text::matches_any;
use wardrobe_core::{FilterTier, GenerationContext, WardrobeItem};
use wardrobe_rules::{gender_conflict, RuleTables};

use crate::checks;

pub trait ItemFilter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Reason the item is dropped at this tier, or `None` to keep it
    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, tier: FilterTier) -> Option<String>;
}

/// Temperature band and active weather conditions
pub struct WeatherFilter;

impl ItemFilter for WeatherFilter {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, _tier: FilterTier) -> Option<String> {
        checks::weather_violation(item, ctx)
    }
}

pub struct OccasionFilter;

impl ItemFilter for OccasionFilter {
    fn name(&self) -> &'static str {
        "occasion"
    }

    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, tier: FilterTier) -> Option<String> {
        match tier {
            FilterTier::Strict => checks::occasion_violation(item, ctx),
            _ => checks::hard_occasion_violation(item, ctx),
        }
    }
}

pub struct StyleFilter;

impl ItemFilter for StyleFilter {
    fn name(&self) -> &'static str {
        "style"
    }

    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, tier: FilterTier) -> Option<String> {
        match tier {
            FilterTier::Strict => checks::style_violation(item, ctx),
            _ => checks::relaxed_style_violation(item, ctx),
        }
    }
}

/// Gender, body type, skin tone and explicit dislikes
pub struct PreferenceFilter {
    tables: Arc<RuleTables>,
}

impl PreferenceFilter {
    pub fn new(tables: Arc<RuleTables>) -> Self {
        Self { tables }
    }
}

impl ItemFilter for PreferenceFilter {
    fn name(&self) -> &'static str {
        "preference"
    }

    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, _tier: FilterTier) -> Option<String> {
        let profile = &ctx.profile;

        if gender_conflict(item.gender.as_deref(), profile.gender.as_deref()) {
            return Some("cut for a different gender".to_string());
        }

        if let Some(rule) = profile.body_type.as_deref().and_then(|b| self.tables.body_type(b)) {
            if rule.discourages(item) {
                return Some(format!("fit not recommended for {} body type", rule.key));
            }
        }

        let color = item.color_lower();
        if let Some(rule) = profile.skin_tone.as_deref().and_then(|s| self.tables.skin_tone(s)) {
            if rule.unflattering(&color) {
                return Some(format!("{} is unflattering for {} undertones", color, rule.key));
            }
        }

        if !color.is_empty() && matches_any(&color, &profile.disliked_colors) {
            return Some(format!("user dislikes {}", color));
        }

        match item.material_lower() {
            Some(material) if matches_any(&material, &profile.avoided_materials) => {
                Some(format!("user avoids {}", material))
            }
            _ => None,
        }
    }
}

pub struct MoodFilter;

impl ItemFilter for MoodFilter {
    fn name(&self) -> &'static str {
        "mood"
    }

    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, _tier: FilterTier) -> Option<String> {
        let rule = ctx.mood_rule.as_ref()?;
        let color = item.color_lower();
        if !color.is_empty() && rule.avoids_color(&color) {
            return Some(format!("{} works against a {} mood", color, rule.key));
        }
        wardrobe_core::text::first_match(&item.search_text(), &rule.avoided_keywords)
            .map(|keyword| format!("'{}' works against a {} mood", keyword, rule.key))
    }
}

/// Items worn inside the recency window; dropped from `NoRecency` on
pub struct RecencyFilter;

impl ItemFilter for RecencyFilter {
    fn name(&self) -> &'static str {
        "recency"
    }

    fn reject(&self, item: &WardrobeItem, ctx: &GenerationContext, tier: FilterTier) -> Option<String> {
        match tier {
            FilterTier::Strict | FilterTier::Relaxed if ctx.recent_item_ids.contains(&item.id) => {
                Some("worn recently".to_string())
            }
            _ => None,
        }
    }
}

/// Standard filters in cascade order
pub fn standard_filters(tables: Arc<RuleTables>) -> Vec<Box<dyn ItemFilter>> {
    vec![
        Box::new(WeatherFilter),
        Box::new(OccasionFilter),
        Box::new(StyleFilter),
        Box::new(PreferenceFilter::new(tables)),
        Box::new(MoodFilter),
        Box::new(RecencyFilter),
    ]
}
