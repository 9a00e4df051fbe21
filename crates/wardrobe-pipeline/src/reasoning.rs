//! Human-readable explanations attached to a generated outfit

use std::collections::{BTreeMap, BTreeSet};

use wardrobe_core::text::{first_match, matches_any, normalize_key};
use wardrobe_core::{CandidateSet, GenerationContext, GenerationMethod, HarmonyBreakdown, WardrobeItem};
use wardrobe_rules::RuleTables;

/// Why one item is in the outfit
pub fn item_reasoning(item: &WardrobeItem, ctx: &GenerationContext) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if ctx.is_base(&item.id) {
        reasons.push("the piece you asked to build around".to_string());
    }
    if let Some(style) = &ctx.style_rule {
        if style.is_exact_match(item) {
            reasons.push(format!("{} style", style.key));
        } else if style.is_match(item) {
            reasons.push(format!("pairs well with {} style", style.key));
        }
    }
    if item.tagged_for(&ctx.occasion_rule.keys()) {
        reasons.push(format!("tagged for {}", ctx.occasion_rule.key));
    }
    if let Some(material) = item.material_lower() {
        if let Some(hit) = first_match(&material, &ctx.layering_rule.recommended_materials) {
            reasons.push(format!("{} suits {} weather", hit, ctx.layering_rule.name));
        }
    }
    if !item.color.is_empty() && matches_any(&item.color_lower(), &ctx.profile.preferred_colors) {
        reasons.push(format!("{} is one of your colors", item.color_lower()));
    }
    if item.favorite_score >= 0.7 {
        reasons.push("a favorite".to_string());
    }
    if item.wear_count == 0 {
        reasons.push("not worn yet".to_string());
    }

    if reasons.is_empty() {
        format!("covers {}", item.category())
    } else {
        reasons.join(", ")
    }
}

/// Summary line for the whole outfit
pub fn outfit_reasoning(set: &CandidateSet, ctx: &GenerationContext, method: GenerationMethod) -> String {
    let names: Vec<&str> = set
        .iter()
        .map(|i| if i.name.is_empty() { i.item_type.as_str() } else { i.name.as_str() })
        .collect();

    let mut summary = format!(
        "{} outfit for {:.0}°F {} weather",
        ctx.occasion_rule.key, ctx.weather.temperature, ctx.layering_rule.name
    );
    if let Some(style) = &ctx.style {
        summary.push_str(&format!(" in a {} style", style));
    }
    if let Some(mood) = &ctx.mood {
        summary.push_str(&format!(" with a {} mood", mood));
    }
    if names.is_empty() {
        summary.push('.');
    } else {
        summary.push_str(&format!(": {}.", names.join(", ")));
    }

    match method {
        GenerationMethod::Primary => {}
        GenerationMethod::Fallback => summary.push_str(" Some pieces were swapped to satisfy the rules."),
        GenerationMethod::FinalFallback => summary.push_str(" Built after a final repair pass."),
    }
    summary
}

pub fn style_summary(set: &CandidateSet, ctx: &GenerationContext) -> String {
    if let Some(style) = &ctx.style_rule {
        let matching = set.iter().filter(|i| style.is_match(i)).count();
        return format!("{} of {} items match {}", matching, set.len(), style.key);
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in set {
        let tags: BTreeSet<String> = item.style.iter().map(|s| normalize_key(s)).collect();
        for tag in tags {
            *counts.entry(tag).or_default() += 1;
        }
    }
    // highest count, alphabetical on ties
    match counts.iter().max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0))) {
        Some((tag, _)) => format!("mostly {}", tag),
        None => "no style tags".to_string(),
    }
}

pub fn color_summary(set: &CandidateSet, tables: &RuleTables, harmony: &HarmonyBreakdown) -> String {
    let accents: BTreeSet<String> = set.iter().filter_map(|i| tables.colors.family(&i.color)).collect();
    let palette = if accents.is_empty() {
        "neutral palette".to_string()
    } else {
        format!("accents: {}", accents.into_iter().collect::<Vec<_>>().join(", "))
    };
    format!("{} (color harmony {:.0}/100)", palette, harmony.color)
}
