//! Pipeline configuration
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes. `WARDROBE_*` environment variables are applied on top.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wardrobe_core::{RuleClass, Severity, WardrobeError};
use wardrobe_filter::DEFAULT_MIN_POOL_SIZE;
use wardrobe_heal::DEFAULT_MAX_ROUNDS;
use wardrobe_quality::ScoringConfig;
use wardrobe_rules::DEFAULT_RECENCY_DAYS;
use wardrobe_stages::{DEFAULT_ACCESSORY_LIMIT, DEFAULT_JITTER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Smallest pool a tier must keep to be accepted
    pub min_pool_size: usize,
    pub recency_days: i64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            recency_days: DEFAULT_RECENCY_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Upper bound of the random score jitter
    pub jitter: f64,
    pub accessory_limit: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            jitter: DEFAULT_JITTER,
            accessory_limit: DEFAULT_ACCESSORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealingConfig {
    pub max_rounds: usize,
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// A rule class that rejects the outfit outright at or above a severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrictClass {
    pub class: RuleClass,
    pub min_severity: Severity,
}

/// "No fallback to bad outfits": violations that survive healing and match
/// a strict class clear the outfit instead of returning it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    pub strict_classes: Vec<StrictClass>,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            strict_classes: vec![StrictClass {
                class: RuleClass::OccasionForbidden,
                min_severity: Severity::Critical,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub timeout_ms: u64,
    pub retries: u32,
    /// Delay before the first retry, doubled for each further one
    pub backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2_000,
            retries: 2,
            backoff_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub filter: FilterConfig,
    pub selection: SelectionConfig,
    pub scoring: ScoringConfig,
    pub healing: HealingConfig,
    pub fallback: FallbackPolicy,
    /// Wardrobes smaller than this fail immediately
    pub min_wardrobe_size: usize,
    /// Outfits below this confidence are returned but flagged unsuccessful
    pub min_confidence: f64,
    pub store: StoreConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            selection: SelectionConfig::default(),
            scoring: ScoringConfig::default(),
            healing: HealingConfig::default(),
            fallback: FallbackPolicy::default(),
            min_wardrobe_size: 3,
            min_confidence: 50.0,
            store: StoreConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, WardrobeError> {
        let config: PipelineConfig =
            serde_yaml::from_str(yaml).map_err(|e| WardrobeError::Config(format!("pipeline: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WardrobeError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| WardrobeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&yaml)
    }

    /// Overlay `WARDROBE_*` variables from the process environment
    pub fn apply_env(&mut self) -> Result<(), WardrobeError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay `WARDROBE_*` variables read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), WardrobeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, raw: String) -> Result<T, WardrobeError> {
            raw.trim()
                .parse()
                .map_err(|_| WardrobeError::Config(format!("{} has an invalid value '{}'", key, raw)))
        }

        if let Some(v) = lookup("WARDROBE_MIN_POOL_SIZE") {
            self.filter.min_pool_size = parse("WARDROBE_MIN_POOL_SIZE", v)?;
        }
        if let Some(v) = lookup("WARDROBE_RECENCY_DAYS") {
            self.filter.recency_days = parse("WARDROBE_RECENCY_DAYS", v)?;
        }
        if let Some(v) = lookup("WARDROBE_JITTER") {
            self.selection.jitter = parse("WARDROBE_JITTER", v)?;
        }
        if let Some(v) = lookup("WARDROBE_ACCESSORY_LIMIT") {
            self.selection.accessory_limit = parse("WARDROBE_ACCESSORY_LIMIT", v)?;
        }
        if let Some(v) = lookup("WARDROBE_MAX_HEAL_ROUNDS") {
            self.healing.max_rounds = parse("WARDROBE_MAX_HEAL_ROUNDS", v)?;
        }
        if let Some(v) = lookup("WARDROBE_MIN_WARDROBE_SIZE") {
            self.min_wardrobe_size = parse("WARDROBE_MIN_WARDROBE_SIZE", v)?;
        }
        if let Some(v) = lookup("WARDROBE_MIN_CONFIDENCE") {
            self.min_confidence = parse("WARDROBE_MIN_CONFIDENCE", v)?;
        }
        if let Some(v) = lookup("WARDROBE_STORE_TIMEOUT_MS") {
            self.store.timeout_ms = parse("WARDROBE_STORE_TIMEOUT_MS", v)?;
        }
        if let Some(v) = lookup("WARDROBE_STORE_RETRIES") {
            self.store.retries = parse("WARDROBE_STORE_RETRIES", v)?;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<(), WardrobeError> {
        self.scoring.validate()?;
        if self.selection.jitter < 0.0 {
            return Err(WardrobeError::Config("selection.jitter must not be negative".into()));
        }
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(WardrobeError::Config(format!(
                "min_confidence must be within 0..100, got {}",
                self.min_confidence
            )));
        }
        if self.min_wardrobe_size == 0 {
            return Err(WardrobeError::Config("min_wardrobe_size must be at least 1".into()));
        }
        if self.filter.recency_days < 0 {
            return Err(WardrobeError::Config("filter.recency_days must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_wardrobe_size, 3);
        assert_eq!(config.min_confidence, 50.0);
        assert_eq!(config.healing.max_rounds, 2);
        assert_eq!(config.fallback.strict_classes.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
min_confidence: 65
selection:
  accessory_limit: 1
fallback:
  strict_classes:
    - class: occasion_forbidden
      min_severity: high
    - class: weather
      min_severity: high
"#;
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.min_confidence, 65.0);
        assert_eq!(config.selection.accessory_limit, 1);
        assert_eq!(config.selection.jitter, DEFAULT_JITTER);
        assert_eq!(config.fallback.strict_classes[1].class, RuleClass::Weather);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [("WARDROBE_MIN_CONFIDENCE", "70"), ("WARDROBE_JITTER", " 0 ")].into();
        let mut config = PipelineConfig::default();
        config
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.min_confidence, 70.0);
        assert_eq!(config.selection.jitter, 0.0);
        assert_eq!(config.min_wardrobe_size, 3);
    }

    #[test]
    fn test_env_overlay_rejects_garbage() {
        let mut config = PipelineConfig::default();
        let err = config
            .apply_env_with(|key| (key == "WARDROBE_STORE_RETRIES").then(|| "many".to_string()))
            .unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/"));
        assert!(err.to_string().contains("WARDROBE_STORE_RETRIES"));
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        assert!(PipelineConfig::from_yaml("min_confidence: 150").is_err());
    }
}
