//! Visual harmony sub-scores (each 0 to 100)

use std::collections::{BTreeMap, BTreeSet};

use wardrobe_core::text::{contains_keyword, normalize_key};
use wardrobe_core::{CandidateSet, Category, GenerationContext, HarmonyBreakdown, WardrobeItem};
use wardrobe_rules::RuleTables;

use crate::profile::ScoringConfig;

const LOOSE_FITS: &[&str] = &["loose", "oversized", "relaxed", "baggy", "wide", "boyfriend", "flowy"];
const SLIM_FITS: &[&str] = &["slim", "skinny", "fitted", "tailored", "tight", "bodycon"];

/// Score lost per accent family above the allowed count
const EXTRA_ACCENT_PENALTY: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Silhouette {
    Loose,
    Slim,
    Regular,
    Unknown,
}

fn silhouette(item: &WardrobeItem) -> Silhouette {
    match item.fit.as_deref().map(str::to_lowercase) {
        None => Silhouette::Unknown,
        Some(fit) if LOOSE_FITS.iter().any(|k| contains_keyword(&fit, k)) => Silhouette::Loose,
        Some(fit) if SLIM_FITS.iter().any(|k| contains_keyword(&fit, k)) => Silhouette::Slim,
        Some(_) => Silhouette::Regular,
    }
}

pub fn color_score(set: &CandidateSet, tables: &RuleTables, config: &ScoringConfig) -> f64 {
    let theory = &tables.colors;
    let items = set.items();
    let accents: BTreeSet<String> = items.iter().filter_map(|i| theory.family(&i.color)).collect();
    if accents.is_empty() {
        return config.neutral_only_score;
    }

    let mut clashes = 0usize;
    for (idx, a) in items.iter().enumerate() {
        clashes += items[idx + 1..]
            .iter()
            .filter(|b| theory.clashes(&a.color, &b.color))
            .count();
    }
    let extra = accents.len().saturating_sub(config.max_accent_colors);

    (100.0 - config.clash_penalty * clashes as f64 - EXTRA_ACCENT_PENALTY * extra as f64).clamp(0.0, 100.0)
}

pub fn texture_score(set: &CandidateSet, tables: &RuleTables, config: &ScoringConfig) -> f64 {
    let materials: Vec<String> = set.iter().filter_map(|i| i.material_lower()).collect();
    let mut conflicts = 0usize;
    for (idx, a) in materials.iter().enumerate() {
        conflicts += materials[idx + 1..]
            .iter()
            .filter(|b| tables.materials.conflict(a, b))
            .count();
    }
    (100.0 - config.material_conflict_penalty * conflicts as f64).clamp(0.0, 100.0)
}

/// Balance between the top and bottom silhouettes
pub fn proportion_score(set: &CandidateSet) -> f64 {
    let top = set.of_category(Category::Top).first().map(|i| silhouette(i));
    let bottom = set.of_category(Category::Bottom).first().map(|i| silhouette(i));

    match (top, bottom) {
        (Some(Silhouette::Loose), Some(Silhouette::Loose)) => 60.0,
        (Some(Silhouette::Loose), Some(Silhouette::Slim)) | (Some(Silhouette::Slim), Some(Silhouette::Loose)) => 100.0,
        (Some(Silhouette::Slim), Some(Silhouette::Slim)) => 85.0,
        (Some(Silhouette::Unknown), _) | (_, Some(Silhouette::Unknown)) => 80.0,
        _ => 90.0,
    }
}

pub fn style_coherence_score(set: &CandidateSet, ctx: &GenerationContext) -> f64 {
    if set.is_empty() {
        return 0.0;
    }

    if let Some(style) = &ctx.style_rule {
        let total: f64 = set
            .iter()
            .map(|item| {
                if style.is_match(item) {
                    1.0
                } else if item.style.is_empty() {
                    0.5
                } else {
                    0.0
                }
            })
            .sum();
        return 100.0 * total / set.len() as f64;
    }

    // no requested style: how many tagged items share the dominant tag
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut tagged = 0usize;
    for item in set.iter().filter(|i| !i.style.is_empty()) {
        tagged += 1;
        let tags: BTreeSet<String> = item.style.iter().map(|s| normalize_key(s)).collect();
        for tag in tags {
            *counts.entry(tag).or_default() += 1;
        }
    }
    match counts.values().max() {
        Some(&dominant) if tagged > 0 => 100.0 * dominant as f64 / tagged as f64,
        _ => 75.0,
    }
}

/// All four sub-scores and their weighted blend
pub fn harmony(
    set: &CandidateSet,
    ctx: &GenerationContext,
    tables: &RuleTables,
    config: &ScoringConfig,
) -> HarmonyBreakdown {
    let weights = &config.harmony_weights;
    let color = color_score(set, tables, config);
    let texture = texture_score(set, tables, config);
    let proportion = proportion_score(set);
    let style_coherence = style_coherence_score(set, ctx);

    let overall = (color * weights.color
        + texture * weights.texture
        + proportion * weights.proportion
        + style_coherence * weights.style_coherence)
        / weights.total();

    HarmonyBreakdown {
        color,
        texture,
        proportion,
        style_coherence,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;

    fn set(items: Vec<WardrobeItem>) -> CandidateSet {
        CandidateSet::from_items(items)
    }

    #[test]
    fn test_neutral_outfit_color_score() {
        let tables = RuleTables::builtin();
        let config = ScoringConfig::default();
        let outfit = set(vec![
            WardrobeItem::new("a", "shirt", "Shirt").with_color("white"),
            WardrobeItem::new("b", "pants", "Pants").with_color("charcoal"),
        ]);
        assert_eq!(color_score(&outfit, &tables, &config), 90.0);
    }

    #[test]
    fn test_clash_lowers_color_score() {
        let tables = RuleTables::builtin();
        let config = ScoringConfig::default();
        let outfit = set(vec![
            WardrobeItem::new("a", "shirt", "Shirt").with_color("red"),
            WardrobeItem::new("b", "pants", "Pants").with_color("green"),
        ]);
        assert_eq!(color_score(&outfit, &tables, &config), 80.0);
    }

    #[test]
    fn test_texture_conflict() {
        let tables = RuleTables::builtin();
        let config = ScoringConfig::default();
        let outfit = set(vec![
            WardrobeItem::new("a", "top", "Top").with_material("satin"),
            WardrobeItem::new("b", "jeans", "Jeans").with_material("denim"),
        ]);
        assert_eq!(texture_score(&outfit, &tables, &config), 75.0);
    }

    #[test]
    fn test_proportion_balance() {
        let loose_top = WardrobeItem::new("t", "shirt", "Shirt").with_fit("oversized");
        let slim_bottom = WardrobeItem::new("b", "jeans", "Jeans").with_fit("slim");
        let loose_bottom = WardrobeItem::new("b", "trousers", "Trousers").with_fit("wide leg");
        let plain_bottom = WardrobeItem::new("b", "chinos", "Chinos");

        assert_eq!(proportion_score(&set(vec![loose_top.clone(), slim_bottom])), 100.0);
        assert_eq!(proportion_score(&set(vec![loose_top.clone(), loose_bottom])), 60.0);
        assert_eq!(proportion_score(&set(vec![loose_top, plain_bottom])), 80.0);
    }

    #[test]
    fn test_style_coherence_with_and_without_style() {
        let classic = context("casual", 70.0, Some("classic"), None);
        let outfit = set(vec![
            WardrobeItem::new("a", "shirt", "Shirt").with_styles(["classic"]),
            WardrobeItem::new("b", "pants", "Pants"),
            WardrobeItem::new("c", "sneakers", "Sneakers").with_styles(["streetwear"]),
            WardrobeItem::new("d", "watch", "Watch").with_styles(["preppy"]),
        ]);
        assert_eq!(style_coherence_score(&outfit, &classic), 62.5);

        let open = context("casual", 70.0, None, None);
        assert!((style_coherence_score(&outfit, &open) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_is_weighted_blend() {
        let tables = RuleTables::builtin();
        let config = ScoringConfig::default();
        let ctx = context("casual", 70.0, None, None);
        let outfit = set(vec![
            WardrobeItem::new("a", "shirt", "Shirt").with_color("white"),
            WardrobeItem::new("b", "pants", "Pants").with_color("navy"),
        ]);
        let h = harmony(&outfit, &ctx, &tables, &config);
        let expected = (h.color * 35.0 + h.texture * 15.0 + h.proportion * 25.0 + h.style_coherence * 25.0) / 100.0;
        assert!((h.overall - expected).abs() < 1e-9);
    }
}
