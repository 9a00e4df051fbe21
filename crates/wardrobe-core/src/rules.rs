//! Rule row types
//!
//! Rows are plain data keyed by a normalized name (occasion, style, mood) or
//! by a temperature range (layering). The tables themselves live in
//! `wardrobe-rules`; stages only see the rows resolved into the context.

use serde::{Deserialize, Serialize};

use crate::item::{Category, WardrobeItem};
use crate::text::{first_match, matches_any, normalize_key};

/// Coarse occasion family, drives item-count bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OccasionCategory {
    Formal,
    Athletic,
    Casual,
    Social,
    Travel,
    WeatherDriven,
    #[default]
    Default,
}

impl OccasionCategory {
    /// (min_items, max_items)
    pub fn item_bounds(&self) -> (usize, usize) {
        match self {
            OccasionCategory::Formal => (3, 6),
            OccasionCategory::Athletic => (3, 4),
            OccasionCategory::Casual => (3, 5),
            OccasionCategory::Social => (3, 5),
            OccasionCategory::Travel => (3, 5),
            OccasionCategory::WeatherDriven => (3, 6),
            OccasionCategory::Default => (3, 5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccasionRule {
    /// Normalized key (ex: "wedding-guest")
    pub key: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    pub category: OccasionCategory,

    /// 1 (loungewear) to 5 (black tie)
    pub formality: u8,

    /// Required categories beyond top/bottom/shoes
    #[serde(default)]
    pub required_categories: Vec<Category>,

    #[serde(default)]
    pub preferred_categories: Vec<Category>,

    /// Keywords that make an item inappropriate
    #[serde(default)]
    pub forbidden_keywords: Vec<String>,

    /// Subset of forbidden keywords that stay enforced in relaxed filtering
    #[serde(default)]
    pub hard_forbidden_keywords: Vec<String>,

    /// When non-empty, core items must match one of these (or carry the occasion tag)
    #[serde(default)]
    pub allowed_keywords: Vec<String>,
}

impl OccasionRule {
    pub fn new(key: impl Into<String>, category: OccasionCategory, formality: u8) -> Self {
        Self {
            key: normalize_key(&key.into()),
            aliases: Vec::new(),
            category,
            formality,
            required_categories: Vec::new(),
            preferred_categories: Vec::new(),
            forbidden_keywords: Vec::new(),
            hard_forbidden_keywords: Vec::new(),
            allowed_keywords: Vec::new(),
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| normalize_key(a)).collect();
        self
    }

    pub fn requires(mut self, categories: &[Category]) -> Self {
        self.required_categories = categories.to_vec();
        self
    }

    pub fn prefers(mut self, categories: &[Category]) -> Self {
        self.preferred_categories = categories.to_vec();
        self
    }

    /// Forbidden keywords; the hard subset is also added to the full list
    pub fn forbids(mut self, soft: &[&str], hard: &[&str]) -> Self {
        self.hard_forbidden_keywords = hard.iter().map(|k| k.to_string()).collect();
        self.forbidden_keywords = hard.iter().chain(soft.iter()).map(|k| k.to_string()).collect();
        self
    }

    pub fn allows(mut self, keywords: &[&str]) -> Self {
        self.allowed_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn matches_key(&self, key: &str) -> bool {
        self.key == key || self.aliases.iter().any(|a| a == key)
    }

    /// All keys this row answers to
    pub fn keys(&self) -> Vec<&str> {
        std::iter::once(self.key.as_str())
            .chain(self.aliases.iter().map(|a| a.as_str()))
            .collect()
    }

    /// First forbidden keyword the item hits
    pub fn forbidden_hit(&self, item: &WardrobeItem) -> Option<String> {
        first_match(&item.search_text(), &self.forbidden_keywords).map(str::to_string)
    }

    /// First hard-forbidden keyword the item hits
    pub fn hard_forbidden_hit(&self, item: &WardrobeItem) -> Option<String> {
        first_match(&item.search_text(), &self.hard_forbidden_keywords).map(str::to_string)
    }

    /// Allow-list check; accessories and tagged items always pass
    pub fn allow_listed(&self, item: &WardrobeItem) -> bool {
        if self.allowed_keywords.is_empty() || item.category() == Category::Accessory {
            return true;
        }
        item.tagged_for(&self.keys()) || matches_any(&item.search_text(), &self.allowed_keywords)
    }

    pub fn is_formal(&self) -> bool {
        self.category == OccasionCategory::Formal || self.formality >= 4
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub key: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Styles that sit well next to this one
    #[serde(default)]
    pub compatible_styles: Vec<String>,

    /// Styles that clash with this one
    #[serde(default)]
    pub incompatible_styles: Vec<String>,

    /// Expected color palette
    #[serde(default)]
    pub palette: Vec<String>,

    #[serde(default)]
    pub forbidden_keywords: Vec<String>,
}

impl StyleRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: normalize_key(&key.into()),
            aliases: Vec::new(),
            compatible_styles: Vec::new(),
            incompatible_styles: Vec::new(),
            palette: Vec::new(),
            forbidden_keywords: Vec::new(),
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| normalize_key(a)).collect();
        self
    }

    pub fn compatible(mut self, styles: &[&str]) -> Self {
        self.compatible_styles = styles.iter().map(|s| normalize_key(s)).collect();
        self
    }

    pub fn incompatible(mut self, styles: &[&str]) -> Self {
        self.incompatible_styles = styles.iter().map(|s| normalize_key(s)).collect();
        self
    }

    pub fn palette(mut self, colors: &[&str]) -> Self {
        self.palette = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn forbids(mut self, keywords: &[&str]) -> Self {
        self.forbidden_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn matches_key(&self, key: &str) -> bool {
        self.key == key || self.aliases.iter().any(|a| a == key)
    }

    /// Item carries this style or a compatible one
    pub fn is_match(&self, item: &WardrobeItem) -> bool {
        item.style.iter().map(|s| normalize_key(s)).any(|s| {
            self.matches_key(&s) || self.compatible_styles.contains(&s)
        })
    }

    /// Item carries this exact style
    pub fn is_exact_match(&self, item: &WardrobeItem) -> bool {
        item.style.iter().any(|s| self.matches_key(&normalize_key(s)))
    }

    pub fn has_incompatible_tag(&self, item: &WardrobeItem) -> bool {
        item.style
            .iter()
            .any(|s| self.incompatible_styles.contains(&normalize_key(s)))
    }

    /// Tagged, but every tag is an incompatible style
    pub fn only_incompatible(&self, item: &WardrobeItem) -> bool {
        !item.style.is_empty()
            && item
                .style
                .iter()
                .all(|s| self.incompatible_styles.contains(&normalize_key(s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRule {
    pub key: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub preferred_colors: Vec<String>,

    #[serde(default)]
    pub avoided_colors: Vec<String>,

    #[serde(default)]
    pub avoided_keywords: Vec<String>,
}

impl MoodRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: normalize_key(&key.into()),
            aliases: Vec::new(),
            preferred_colors: Vec::new(),
            avoided_colors: Vec::new(),
            avoided_keywords: Vec::new(),
        }
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| normalize_key(a)).collect();
        self
    }

    pub fn colors(mut self, preferred: &[&str], avoided: &[&str]) -> Self {
        self.preferred_colors = preferred.iter().map(|c| c.to_string()).collect();
        self.avoided_colors = avoided.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn avoids(mut self, keywords: &[&str]) -> Self {
        self.avoided_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn matches_key(&self, key: &str) -> bool {
        self.key == key || self.aliases.iter().any(|a| a == key)
    }

    pub fn avoids_color(&self, color: &str) -> bool {
        matches_any(color, &self.avoided_colors)
    }

    pub fn prefers_color(&self, color: &str) -> bool {
        matches_any(color, &self.preferred_colors)
    }
}

/// Temperature band with layering expectations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeringRule {
    pub name: String,

    /// Inclusive lower bound (°F)
    pub min_temp: f64,

    /// Exclusive upper bound (°F)
    pub max_temp: f64,

    /// Expected layer pieces (Layer + Outerwear)
    pub min_layers: usize,

    pub max_layers: usize,

    /// Band requires an outer layer to be structurally complete
    #[serde(default)]
    pub requires_outerwear: bool,

    #[serde(default)]
    pub forbidden_keywords: Vec<String>,

    #[serde(default)]
    pub recommended_materials: Vec<String>,

    /// Materials that warrant a warning in this band
    #[serde(default)]
    pub discouraged_materials: Vec<String>,
}

impl LayeringRule {
    pub fn new(name: impl Into<String>, min_temp: f64, max_temp: f64) -> Self {
        Self {
            name: name.into(),
            min_temp,
            max_temp,
            min_layers: 0,
            max_layers: 2,
            requires_outerwear: false,
            forbidden_keywords: Vec::new(),
            recommended_materials: Vec::new(),
            discouraged_materials: Vec::new(),
        }
    }

    pub fn layers(mut self, min: usize, max: usize) -> Self {
        self.min_layers = min;
        self.max_layers = max;
        self
    }

    pub fn requires_outerwear(mut self) -> Self {
        self.requires_outerwear = true;
        self
    }

    pub fn forbids(mut self, keywords: &[&str]) -> Self {
        self.forbidden_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn materials(mut self, recommended: &[&str], discouraged: &[&str]) -> Self {
        self.recommended_materials = recommended.iter().map(|m| m.to_string()).collect();
        self.discouraged_materials = discouraged.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn contains(&self, temperature: f64) -> bool {
        temperature >= self.min_temp && temperature < self.max_temp
    }

    pub fn forbidden_hit(&self, item: &WardrobeItem) -> Option<String> {
        first_match(&item.search_text(), &self.forbidden_keywords).map(str::to_string)
    }
}

/// Weather-condition row (rain, snow, wind)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub key: String,

    /// Condition substrings that activate this row
    pub triggers: Vec<String>,

    /// Activates regardless of condition text above this precipitation (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_precipitation: Option<f64>,

    #[serde(default)]
    pub forbidden_keywords: Vec<String>,

    #[serde(default)]
    pub discouraged_materials: Vec<String>,
}

impl ConditionRule {
    pub fn new(key: impl Into<String>, triggers: &[&str]) -> Self {
        Self {
            key: key.into(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            min_precipitation: None,
            forbidden_keywords: Vec::new(),
            discouraged_materials: Vec::new(),
        }
    }

    pub fn above_precipitation(mut self, percent: f64) -> Self {
        self.min_precipitation = Some(percent);
        self
    }

    pub fn forbids(mut self, keywords: &[&str]) -> Self {
        self.forbidden_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn discourages(mut self, materials: &[&str]) -> Self {
        self.discouraged_materials = materials.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn applies(&self, condition: &str, precipitation: f64) -> bool {
        let condition = condition.to_lowercase();
        self.triggers.iter().any(|t| condition.contains(t.as_str()))
            || self.min_precipitation.map_or(false, |p| precipitation >= p)
    }

    pub fn forbidden_hit(&self, item: &WardrobeItem) -> Option<String> {
        first_match(&item.search_text(), &self.forbidden_keywords).map(str::to_string)
    }
}
