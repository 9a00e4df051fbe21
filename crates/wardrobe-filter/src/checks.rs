//! Per-item checks shared by the filters, the selector and the healer.
//!
//! Each check returns the reason an item is unsuitable, or `None`.

use wardrobe_core::{GenerationContext, WardrobeItem};

/// Full-strength occasion check: forbidden keywords, then the allow-list
pub fn occasion_violation(item: &WardrobeItem, ctx: &GenerationContext) -> Option<String> {
    let rule = &ctx.occasion_rule;
    if let Some(keyword) = rule.forbidden_hit(item) {
        return Some(format!("'{}' is not appropriate for {}", keyword, rule.key));
    }
    if !rule.allow_listed(item) {
        return Some(format!("{} is not suited to {}", item.item_type, rule.key));
    }
    None
}

/// Occasion check reduced to the hard-forbidden keywords
pub fn hard_occasion_violation(item: &WardrobeItem, ctx: &GenerationContext) -> Option<String> {
    ctx.occasion_rule
        .hard_forbidden_hit(item)
        .map(|keyword| format!("'{}' is never appropriate for {}", keyword, ctx.occasion_rule.key))
}

/// Full-strength style check; no style rule means no constraint
pub fn style_violation(item: &WardrobeItem, ctx: &GenerationContext) -> Option<String> {
    let rule = ctx.style_rule.as_ref()?;
    if let Some(keyword) = wardrobe_core::text::first_match(&item.search_text(), &rule.forbidden_keywords) {
        return Some(format!("'{}' clashes with {} style", keyword, rule.key));
    }
    if rule.has_incompatible_tag(item) {
        return Some(format!("styled against {}", rule.key));
    }
    None
}

/// Relaxed style check: only items whose every tag is incompatible
pub fn relaxed_style_violation(item: &WardrobeItem, ctx: &GenerationContext) -> Option<String> {
    let rule = ctx.style_rule.as_ref()?;
    rule.only_incompatible(item)
        .then(|| format!("only styled against {}", rule.key))
}

pub fn weather_violation(item: &WardrobeItem, ctx: &GenerationContext) -> Option<String> {
    ctx.weather_forbidden_hit(item)
        .map(|keyword| format!("'{}' is unsuitable for {} weather", keyword, ctx.layering_rule.name))
}

/// Occasion, style and weather checks combined
pub fn item_violation(item: &WardrobeItem, ctx: &GenerationContext) -> Option<String> {
    occasion_violation(item, ctx)
        .or_else(|| style_violation(item, ctx))
        .or_else(|| weather_violation(item, ctx))
}

pub fn passes_item_checks(item: &WardrobeItem, ctx: &GenerationContext) -> bool {
    item_violation(item, ctx).is_none()
}
