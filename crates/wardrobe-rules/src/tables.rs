//! Rule tables: every static row the pipeline consults, in one value.
//!
//! Built-in tables are assembled once on first use and shared behind an
//! `Arc`. A deployment may replace them wholesale from YAML at startup; the
//! loaded value is validated before it is handed out and never mutated.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use wardrobe_core::text::normalize_key;
use wardrobe_core::{ConditionRule, LayeringRule, MoodRule, OccasionRule, StyleRule, WardrobeError, Weather};

use crate::materials::MaterialTable;
use crate::palette::ColorTheory;
use crate::personal::{body_type_rules, skin_tone_rules, BodyTypeRule, SkinToneRule};
use crate::{occasions, styles, weather};

/// Key every occasion lookup falls back to
pub const DEFAULT_OCCASION: &str = "default";

static BUILTIN: Lazy<Arc<RuleTables>> = Lazy::new(|| Arc::new(RuleTables::builtin()));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    pub version: String,
    pub occasions: Vec<OccasionRule>,
    #[serde(default)]
    pub styles: Vec<StyleRule>,
    #[serde(default)]
    pub moods: Vec<MoodRule>,
    pub layering: Vec<LayeringRule>,
    #[serde(default)]
    pub conditions: Vec<ConditionRule>,
    #[serde(default)]
    pub colors: ColorTheory,
    #[serde(default)]
    pub materials: MaterialTable,
    #[serde(default)]
    pub body_types: Vec<BodyTypeRule>,
    #[serde(default)]
    pub skin_tones: Vec<SkinToneRule>,
}

impl RuleTables {
    pub fn builtin() -> Self {
        Self {
            version: "builtin-1".to_string(),
            occasions: occasions::occasion_rules(),
            styles: styles::style_rules(),
            moods: styles::mood_rules(),
            layering: weather::layering_rules(),
            conditions: weather::condition_rules(),
            colors: ColorTheory::builtin(),
            materials: MaterialTable::builtin(),
            body_types: body_type_rules(),
            skin_tones: skin_tone_rules(),
        }
    }

    /// Shared handle to the built-in tables
    pub fn shared() -> Arc<RuleTables> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, WardrobeError> {
        let mut tables: RuleTables =
            serde_yaml::from_str(yaml).map_err(|e| WardrobeError::Config(format!("rule tables: {}", e)))?;
        tables.normalize();
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WardrobeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WardrobeError::Config(format!("{}: {}", path.display(), e)))?;
        let tables = Self::from_yaml(&raw)?;
        tracing::info!(
            path = %path.display(),
            version = %tables.version,
            occasions = tables.occasions.len(),
            "loaded rule tables"
        );
        Ok(tables)
    }

    pub fn to_yaml(&self) -> Result<String, WardrobeError> {
        serde_yaml::to_string(self).map_err(|e| WardrobeError::Serialize(e.to_string()))
    }

    /// Hand-written YAML keys may not be normalized yet
    fn normalize(&mut self) {
        for rule in &mut self.occasions {
            rule.key = normalize_key(&rule.key);
            rule.aliases = rule.aliases.iter().map(|a| normalize_key(a)).collect();
        }
        for rule in &mut self.styles {
            rule.key = normalize_key(&rule.key);
            rule.aliases = rule.aliases.iter().map(|a| normalize_key(a)).collect();
        }
        for rule in &mut self.moods {
            rule.key = normalize_key(&rule.key);
            rule.aliases = rule.aliases.iter().map(|a| normalize_key(a)).collect();
        }
        self.layering
            .sort_by(|a, b| a.min_temp.partial_cmp(&b.min_temp).unwrap_or(std::cmp::Ordering::Equal));
    }

    pub fn validate(&self) -> Result<(), WardrobeError> {
        if !self.occasions.iter().any(|o| o.key == DEFAULT_OCCASION) {
            return Err(WardrobeError::Config(format!(
                "occasion table has no '{}' row",
                DEFAULT_OCCASION
            )));
        }
        if self.layering.is_empty() {
            return Err(WardrobeError::Config("layering table is empty".into()));
        }
        for band in &self.layering {
            if band.min_temp >= band.max_temp {
                return Err(WardrobeError::Config(format!(
                    "layering band '{}' has an empty range",
                    band.name
                )));
            }
            if band.min_layers > band.max_layers {
                return Err(WardrobeError::Config(format!(
                    "layering band '{}' expects more layers than it allows",
                    band.name
                )));
            }
        }
        Ok(())
    }

    /// Occasion row for a raw occasion string, falling back to `default`
    pub fn occasion(&self, raw: &str) -> Result<&OccasionRule, WardrobeError> {
        let key = normalize_key(raw);
        if let Some(rule) = self.occasions.iter().find(|o| o.matches_key(&key)) {
            return Ok(rule);
        }

        tracing::debug!(occasion = %key, "unknown occasion, using default rule");
        self.occasions
            .iter()
            .find(|o| o.key == DEFAULT_OCCASION)
            .ok_or_else(|| WardrobeError::RuleLookup(format!("no rule for occasion '{}'", key)))
    }

    pub fn style(&self, raw: &str) -> Option<&StyleRule> {
        let key = normalize_key(raw);
        self.styles.iter().find(|s| s.matches_key(&key))
    }

    pub fn mood(&self, raw: &str) -> Option<&MoodRule> {
        let key = normalize_key(raw);
        self.moods.iter().find(|m| m.matches_key(&key))
    }

    /// Band containing the temperature; out-of-range values clamp to the nearest band
    pub fn layering_for(&self, temperature: f64) -> Result<&LayeringRule, WardrobeError> {
        if let Some(band) = self.layering.iter().find(|b| b.contains(temperature)) {
            return Ok(band);
        }

        let band = if temperature.is_nan() {
            None
        } else if self.layering.first().map_or(false, |b| temperature < b.min_temp) {
            self.layering.first()
        } else {
            self.layering.last()
        };
        band.ok_or_else(|| WardrobeError::RuleLookup(format!("no layering band for {}°F", temperature)))
    }

    /// Condition rows active for the given weather
    pub fn conditions_for(&self, weather: &Weather) -> Vec<&ConditionRule> {
        self.conditions
            .iter()
            .filter(|c| c.applies(&weather.condition, weather.precipitation))
            .collect()
    }

    pub fn body_type(&self, raw: &str) -> Option<&BodyTypeRule> {
        let key = normalize_key(raw);
        self.body_types.iter().find(|b| b.key == key)
    }

    pub fn skin_tone(&self, raw: &str) -> Option<&SkinToneRule> {
        let key = normalize_key(raw);
        self.skin_tones.iter().find(|s| s.key == key)
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occasion_lookup_is_separator_insensitive() {
        let tables = RuleTables::builtin();
        assert_eq!(tables.occasion("Wedding Guest").unwrap().key, "wedding-guest");
        assert_eq!(tables.occasion("wedding_guest").unwrap().key, "wedding-guest");
        assert_eq!(tables.occasion("  WEDDING-guest ").unwrap().key, "wedding-guest");
        assert_eq!(tables.occasion("black tie").unwrap().key, "gala");
    }

    #[test]
    fn test_unknown_occasion_falls_back_to_default() {
        let tables = RuleTables::builtin();
        assert_eq!(tables.occasion("moon landing").unwrap().key, DEFAULT_OCCASION);
    }

    #[test]
    fn test_layering_lookup_clamps() {
        let tables = RuleTables::builtin();
        assert_eq!(tables.layering_for(50.0).unwrap().name, "cool");
        assert_eq!(tables.layering_for(-500.0).unwrap().name, "freezing");
        assert_eq!(tables.layering_for(500.0).unwrap().name, "hot");
        assert!(tables.layering_for(f64::NAN).is_err());
    }

    #[test]
    fn test_conditions_for_weather() {
        let tables = RuleTables::builtin();
        let rainy = Weather::new(55.0, "Light rain");
        let keys: Vec<&str> = tables.conditions_for(&rainy).iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["rain"]);
        assert!(tables.conditions_for(&Weather::default()).is_empty());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_lookups() {
        let yaml = RuleTables::builtin().to_yaml().unwrap();
        let tables = RuleTables::from_yaml(&yaml).unwrap();
        assert_eq!(tables.occasion("office").unwrap().key, "business");
        assert!(tables.style("boho").is_some());
    }

    #[test]
    fn test_yaml_without_default_row_is_rejected() {
        let yaml = r#"
version: custom
occasions:
  - key: Business
    category: formal
    formality: 4
layering:
  - name: all
    min_temp: -100
    max_temp: 200
    min_layers: 0
    max_layers: 2
"#;
        let err = RuleTables::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/"));
    }

    #[test]
    fn test_minimal_yaml_normalizes_keys() {
        let yaml = r#"
version: custom
occasions:
  - key: Default
    category: default
    formality: 2
  - key: Date Night
    aliases: ["Dinner Date"]
    category: social
    formality: 3
layering:
  - name: all
    min_temp: -100
    max_temp: 200
    min_layers: 0
    max_layers: 2
"#;
        let tables = RuleTables::from_yaml(yaml).unwrap();
        assert_eq!(tables.occasion("dinner_date").unwrap().key, "date-night");
        assert!(tables.style("classic").is_none());
    }
}
