//! Validation result types
//!
//! A [`ValidationResult`] is produced fresh by every validation pass. Rule
//! checks emit [`RuleIssue`]s; blocking issues become errors, the rest
//! become warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an issue (and of a whole result)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Rule family an issue belongs to; the healer dispatches on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleClass {
    OccasionForbidden,
    MissingCategory,
    ItemCount,
    Layering,
    ColorClash,
    ColorPalette,
    Material,
    Weather,
    StyleMismatch,
    MoodMismatch,
}

impl RuleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleClass::OccasionForbidden => "occasion_forbidden",
            RuleClass::MissingCategory => "missing_category",
            RuleClass::ItemCount => "item_count",
            RuleClass::Layering => "layering",
            RuleClass::ColorClash => "color_clash",
            RuleClass::ColorPalette => "color_palette",
            RuleClass::Material => "material",
            RuleClass::Weather => "weather",
            RuleClass::StyleMismatch => "style_mismatch",
            RuleClass::MoodMismatch => "mood_mismatch",
        }
    }
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleIssue {
    pub class: RuleClass,
    pub severity: Severity,
    /// Blocking issues are errors, others are warnings
    pub blocking: bool,
    pub message: String,
    /// Items responsible for the issue
    #[serde(default)]
    pub item_ids: Vec<String>,
}

impl RuleIssue {
    pub fn error(class: RuleClass, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            class,
            severity,
            blocking: true,
            message: message.into(),
            item_ids: Vec::new(),
        }
    }

    pub fn warning(class: RuleClass, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            class,
            severity,
            blocking: false,
            message: message.into(),
            item_ids: Vec::new(),
        }
    }

    pub fn with_items<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn involves(&self, item_id: &str) -> bool {
        self.item_ids.iter().any(|id| id == item_id)
    }
}

/// Visual-harmony sub-scores, each 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HarmonyBreakdown {
    pub color: f64,
    pub texture: f64,
    pub proportion: f64,
    pub style_coherence: f64,
    /// Weighted blend of the four
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// 0 to 100
    pub confidence: f64,
    pub severity: Severity,
    pub issues: Vec<RuleIssue>,
    pub harmony: HarmonyBreakdown,
}

impl ValidationResult {
    /// Assemble a result; `meets_min_items` comes from the engine's count check
    pub fn from_issues(
        issues: Vec<RuleIssue>,
        confidence: f64,
        harmony: HarmonyBreakdown,
        meets_min_items: bool,
    ) -> Self {
        let errors: Vec<String> = issues
            .iter()
            .filter(|i| i.blocking)
            .map(|i| i.message.clone())
            .collect();
        let warnings: Vec<String> = issues
            .iter()
            .filter(|i| !i.blocking)
            .map(|i| i.message.clone())
            .collect();
        let severity = issues.iter().map(|i| i.severity).max().unwrap_or_default();

        Self {
            is_valid: errors.is_empty() && meets_min_items,
            errors,
            warnings,
            confidence,
            severity,
            issues,
            harmony,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn blocking_issues(&self) -> impl Iterator<Item = &RuleIssue> {
        self.issues.iter().filter(|i| i.blocking)
    }

    pub fn has_blocking(&self, class: RuleClass) -> bool {
        self.blocking_issues().any(|i| i.class == class)
    }

    /// Blocking issues of the given class at or above a severity
    pub fn blocking_at_least(&self, class: RuleClass, severity: Severity) -> Vec<&RuleIssue> {
        self.blocking_issues()
            .filter(|i| i.class == class && i.severity >= severity)
            .collect()
    }

    /// Distinct classes of blocking issues, in first-seen order
    pub fn failed_classes(&self) -> Vec<RuleClass> {
        let mut classes = Vec::new();
        for issue in self.blocking_issues() {
            if !classes.contains(&issue.class) {
                classes.push(issue.class);
            }
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_issues_splits_errors_and_warnings() {
        let issues = vec![
            RuleIssue::error(RuleClass::OccasionForbidden, Severity::Critical, "no sneakers")
                .with_items(["s1"]),
            RuleIssue::warning(RuleClass::ColorClash, Severity::Medium, "red and green clash"),
        ];
        let result = ValidationResult::from_issues(issues, 70.0, HarmonyBreakdown::default(), true);

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["no sneakers".to_string()]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.failed_classes(), vec![RuleClass::OccasionForbidden]);
    }

    #[test]
    fn test_valid_requires_min_items() {
        let result = ValidationResult::from_issues(vec![], 90.0, HarmonyBreakdown::default(), false);
        assert!(!result.is_valid);
        assert_eq!(result.severity, Severity::Low);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
    }
}
