//! Validation engine
//!
//! Runs every [`RuleCheck`] in order, collects the issues and turns them
//! into a [`ValidationResult`] with a confidence score. The engine holds no
//! per-call state: validating the same set under the same context twice
//! gives identical results.

use std::sync::Arc;

use wardrobe_core::{CandidateSet, GenerationContext, ValidationResult, WardrobeError};
use wardrobe_rules::RuleTables;

use crate::checks::{standard_checks, RuleCheck};
use crate::harmony::harmony;
use crate::profile::ScoringConfig;

pub struct ValidationEngine {
    tables: Arc<RuleTables>,
    config: ScoringConfig,
    checks: Vec<Box<dyn RuleCheck>>,
}

impl ValidationEngine {
    pub fn new(tables: Arc<RuleTables>) -> Self {
        let config = ScoringConfig::default();
        Self {
            checks: standard_checks(config.max_accent_colors),
            tables,
            config,
        }
    }

    pub fn with_config(tables: Arc<RuleTables>, config: ScoringConfig) -> Result<Self, WardrobeError> {
        config.validate()?;
        Ok(Self {
            checks: standard_checks(config.max_accent_colors),
            tables,
            config,
        })
    }

    /// Replace the check list
    pub fn with_checks(mut self, checks: Vec<Box<dyn RuleCheck>>) -> Self {
        self.checks = checks;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn tables(&self) -> &Arc<RuleTables> {
        &self.tables
    }

    pub fn validate(&self, set: &CandidateSet, ctx: &GenerationContext) -> ValidationResult {
        let mut issues = Vec::new();
        for check in &self.checks {
            let found = check.check(set, ctx, &self.tables);
            if !found.is_empty() {
                tracing::debug!(check = check.name(), issues = found.len(), "rule check reported issues");
            }
            issues.extend(found);
        }

        let errors = issues.iter().filter(|i| i.blocking).count();
        let warnings = issues.len() - errors;
        let count_ok = ctx.targets.contains_count(set.len());
        let complete = set.missing(ctx.required_categories()).is_empty();
        let harmony = harmony(set, ctx, &self.tables, &self.config);
        let confidence = confidence(&self.config, errors, warnings, count_ok, complete, harmony.overall);

        ValidationResult::from_issues(issues, confidence, harmony, set.len() >= ctx.targets.min_items)
    }
}

/// Rule score blended with the harmony score, rounded to one decimal
pub fn confidence(
    config: &ScoringConfig,
    errors: usize,
    warnings: usize,
    count_ok: bool,
    complete: bool,
    harmony: f64,
) -> f64 {
    let mut score = config.base_score - config.error_penalty * errors as f64 - config.warning_penalty * warnings as f64;
    if count_ok {
        score += config.count_bonus;
    }
    if complete {
        score += config.completeness_bonus;
    }
    let score = score.clamp(0.0, 100.0);

    let blended = (1.0 - config.harmony_weight) * score + config.harmony_weight * harmony.clamp(0.0, 100.0);
    (blended * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use wardrobe_core::{RuleClass, Severity, WardrobeItem};

    fn engine() -> ValidationEngine {
        ValidationEngine::new(RuleTables::shared())
    }

    fn business_set() -> CandidateSet {
        CandidateSet::from_items(vec![
            WardrobeItem::new("shirt", "dress shirt", "White Dress Shirt").with_color("white"),
            WardrobeItem::new("pants", "dress pants", "Charcoal Dress Pants").with_color("charcoal"),
            WardrobeItem::new("blazer", "blazer", "Navy Blazer").with_color("navy"),
        ])
    }

    #[test]
    fn test_confidence_formula() {
        let config = ScoringConfig::default();
        // 100 - 15 - 10 + 5 + 5 = 85, blended with 50
        assert_eq!(confidence(&config, 1, 2, true, true, 50.0), 78.0);
        assert_eq!(confidence(&config, 10, 0, false, false, 0.0), 0.0);
        assert_eq!(confidence(&config, 0, 0, true, true, 100.0), 100.0);
    }

    #[test]
    fn test_business_outfit_missing_shoes() {
        let ctx = context("business", 50.0, None, None);
        let result = engine().validate(&business_set(), &ctx);

        assert!(!result.is_valid);
        assert_eq!(result.error_count(), 1);
        assert!(result.has_blocking(RuleClass::MissingCategory));
        assert_eq!(result.severity, Severity::High);
        assert!(result.confidence > 60.0);
    }

    #[test]
    fn test_complete_outfit_is_valid() {
        let ctx = context("business", 50.0, None, None);
        let mut set = business_set();
        set.push(WardrobeItem::new("shoes", "loafers", "Brown Loafers").with_color("brown"));
        let result = engine().validate(&set, &ctx);

        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.confidence > 85.0);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let ctx = context("athletic", 90.0, Some("classic"), Some("somber"));
        let set = CandidateSet::from_items(vec![
            WardrobeItem::new("blazer", "blazer", "Blazer").with_color("red"),
            WardrobeItem::new("shoes", "dress shoes", "Dress Shoes").with_color("green"),
        ]);
        let engine = engine();
        assert_eq!(engine.validate(&set, &ctx), engine.validate(&set, &ctx));
    }

    #[test]
    fn test_too_few_items_is_never_valid() {
        let ctx = context("casual", 70.0, None, None);
        let set = CandidateSet::from_items(vec![WardrobeItem::new("dress", "dress", "Sundress")]);
        let result = engine().validate(&set, &ctx);
        assert!(!result.is_valid);
        assert!(result.has_blocking(RuleClass::ItemCount));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ScoringConfig {
            harmony_weight: 2.0,
            ..ScoringConfig::default()
        };
        assert!(ValidationEngine::with_config(RuleTables::shared(), config).is_err());
    }
}
