//! Relevance scoring
//!
//! `base_score` is a pure function of (item, context) and is what the
//! completer, deduplicator and healer rank by. The selector adds a seeded
//! jitter on top so that equal-looking wardrobes still vary between seeds.

use rand::rngs::SmallRng;
use rand::Rng;
use std::cmp::Ordering;

use wardrobe_core::text::matches_any;
use wardrobe_core::{Category, GenerationContext, WardrobeItem};

/// Default upper bound of the selection jitter
pub const DEFAULT_JITTER: f64 = 0.5;

const STYLE_EXACT: f64 = 2.0;
const STYLE_COMPATIBLE: f64 = 1.0;
const OCCASION_TAG: f64 = 2.0;
const WEATHER_FIT: f64 = 1.0;
const COLOR_PREFERENCE: f64 = 1.0;
const MINOR_PREFERENCE: f64 = 0.5;
const FAVORITE_WEIGHT: f64 = 0.5;
const UNWORN_BONUS: f64 = 0.75;

pub fn category_weight(category: Category) -> f64 {
    match category {
        Category::Top | Category::Bottom | Category::Shoes => 3.0,
        Category::OnePiece => 2.5,
        Category::Layer | Category::Outerwear => 1.5,
        Category::Accessory => 1.0,
        Category::Other => 0.5,
    }
}

/// Relevance without jitter
pub fn base_score(item: &WardrobeItem, ctx: &GenerationContext) -> f64 {
    let mut score = category_weight(item.category());

    if let Some(style) = &ctx.style_rule {
        if style.is_exact_match(item) {
            score += STYLE_EXACT;
        } else if style.is_match(item) {
            score += STYLE_COMPATIBLE;
        }
    }

    if item.tagged_for(&ctx.occasion_rule.keys()) {
        score += OCCASION_TAG;
    }

    if let Some(material) = item.material_lower() {
        let band = &ctx.layering_rule;
        if matches_any(&material, &band.recommended_materials) {
            score += WEATHER_FIT;
        } else if matches_any(&material, &band.discouraged_materials) {
            score -= WEATHER_FIT;
        }
    }

    let profile = &ctx.profile;
    let color = item.color_lower();
    if !color.is_empty() {
        if matches_any(&color, &profile.preferred_colors) {
            score += COLOR_PREFERENCE;
        }
        if ctx.mood_rule.as_ref().map_or(false, |m| m.prefers_color(&color)) {
            score += MINOR_PREFERENCE;
        }
    }
    if item
        .material_lower()
        .map_or(false, |m| matches_any(&m, &profile.preferred_materials))
    {
        score += MINOR_PREFERENCE;
    }
    if item.brand.as_deref().map_or(false, |b| matches_any(b, &profile.preferred_brands)) {
        score += MINOR_PREFERENCE;
    }
    if item.fit.as_deref().map_or(false, |f| matches_any(f, &profile.preferred_fits)) {
        score += MINOR_PREFERENCE;
    }

    score += item.favorite_score.clamp(0.0, 1.0) * FAVORITE_WEIGHT;
    if item.wear_count == 0 {
        score += UNWORN_BONUS;
    }

    score
}

/// Relevance plus a jitter in `[0, jitter)`
pub fn jittered_score(item: &WardrobeItem, ctx: &GenerationContext, jitter: f64, rng: &mut SmallRng) -> f64 {
    let base = base_score(item, ctx);
    if jitter > 0.0 {
        base + rng.random_range(0.0..jitter)
    } else {
        base
    }
}

/// Items paired with their score, best first; ties broken by id
pub fn rank<'a, I, F>(items: I, mut score: F) -> Vec<(f64, &'a WardrobeItem)>
where
    I: IntoIterator<Item = &'a WardrobeItem>,
    F: FnMut(&WardrobeItem) -> f64,
{
    let mut ranked: Vec<(f64, &WardrobeItem)> = items.into_iter().map(|i| (score(i), i)).collect();
    ranked.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.id.cmp(&b.1.id))
    });
    ranked
}
