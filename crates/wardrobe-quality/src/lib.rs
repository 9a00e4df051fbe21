//! Wardrobe Quality: rule checks, visual harmony and confidence
//!
//! [`ValidationEngine::validate`] is the single entry point used by the
//! generator and the healer.

pub mod checks;
pub mod engine;
pub mod harmony;
pub mod profile;

pub use checks::{
    standard_checks, ColorCheck, LayeringCheck, MaterialCheck, OccasionCheck, RuleCheck, StyleCheck, WeatherCheck,
};
pub use engine::{confidence, ValidationEngine};
pub use harmony::{color_score, harmony, proportion_score, style_coherence_score, texture_score};
pub use profile::{HarmonyWeights, ScoringConfig};
