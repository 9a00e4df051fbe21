//! Scoring profile
//!
//! Every constant of the confidence formula and the harmony sub-scores.
//! The defaults are tuned values, not derived ones; deployments may load
//! their own from YAML.

use serde::{Deserialize, Serialize};
use wardrobe_core::WardrobeError;

/// Relative weights of the harmony sub-scores (sum to 100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyWeights {
    pub color: f64,
    pub texture: f64,
    pub proportion: f64,
    pub style_coherence: f64,
}

impl Default for HarmonyWeights {
    fn default() -> Self {
        Self {
            color: 35.0,
            texture: 15.0,
            proportion: 25.0,
            style_coherence: 25.0,
        }
    }
}

impl HarmonyWeights {
    pub fn total(&self) -> f64 {
        self.color + self.texture + self.proportion + self.style_coherence
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    // === Confidence ===
    /// Starting score
    pub base_score: f64,

    /// Subtracted per error
    pub error_penalty: f64,

    /// Subtracted per warning
    pub warning_penalty: f64,

    /// Added when the item count is within bounds
    pub count_bonus: f64,

    /// Added when every required category is covered
    pub completeness_bonus: f64,

    /// Share of the final confidence taken from visual harmony (0.0 to 1.0)
    pub harmony_weight: f64,

    // === Harmony ===
    pub harmony_weights: HarmonyWeights,

    /// Color score when every color is neutral
    pub neutral_only_score: f64,

    /// Color score lost per clashing pair
    pub clash_penalty: f64,

    /// Accent families allowed before a warning
    pub max_accent_colors: usize,

    /// Texture score lost per material conflict
    pub material_conflict_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            error_penalty: 15.0,
            warning_penalty: 5.0,
            count_bonus: 5.0,
            completeness_bonus: 5.0,
            harmony_weight: 0.2,
            harmony_weights: HarmonyWeights::default(),
            neutral_only_score: 90.0,
            clash_penalty: 20.0,
            max_accent_colors: 3,
            material_conflict_penalty: 25.0,
        }
    }
}

impl ScoringConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, WardrobeError> {
        let config: ScoringConfig =
            serde_yaml::from_str(yaml).map_err(|e| WardrobeError::Config(format!("scoring: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WardrobeError> {
        if !(0.0..=1.0).contains(&self.harmony_weight) {
            return Err(WardrobeError::Config(format!(
                "harmony_weight must be within 0..1, got {}",
                self.harmony_weight
            )));
        }
        if self.harmony_weights.total() <= 0.0 {
            return Err(WardrobeError::Config("harmony weights sum to zero".into()));
        }
        if self.error_penalty < 0.0 || self.warning_penalty < 0.0 {
            return Err(WardrobeError::Config("penalties must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.error_penalty, 15.0);
        assert_eq!(config.warning_penalty, 5.0);
        assert_eq!(config.harmony_weights.total(), 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScoringConfig::from_yaml("error_penalty: 20\nharmony_weights:\n  color: 50\n").unwrap();
        assert_eq!(config.error_penalty, 20.0);
        assert_eq!(config.warning_penalty, 5.0);
        assert_eq!(config.harmony_weights.color, 50.0);
        assert_eq!(config.harmony_weights.texture, 15.0);
    }

    #[test]
    fn test_rejects_out_of_range_harmony_weight() {
        let err = ScoringConfig::from_yaml("harmony_weight: 1.5").unwrap_err();
        assert!(err.to_string().contains("harmony_weight"));
    }
}
