//! Rule checks
//!
//! Each check is independent and reads only the set, the context and the
//! rule tables. Issue order within a check follows item order, so two runs
//! over the same input produce identical lists.

use std::collections::BTreeSet;

use wardrobe_core::text::{first_match, matches_any};
use wardrobe_core::{
    CandidateSet, Category, GenerationContext, RuleClass, RuleIssue, Severity, SleeveLength, WardrobeItem,
};
use wardrobe_rules::RuleTables;

pub trait RuleCheck: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, set: &CandidateSet, ctx: &GenerationContext, tables: &RuleTables) -> Vec<RuleIssue>;
}

fn label(item: &WardrobeItem) -> &str {
    if item.name.is_empty() {
        &item.item_type
    } else {
        &item.name
    }
}

/// Forbidden items, required coverage and item-count bounds
pub struct OccasionCheck;

impl RuleCheck for OccasionCheck {
    fn name(&self) -> &'static str {
        "occasion"
    }

    fn check(&self, set: &CandidateSet, ctx: &GenerationContext, _tables: &RuleTables) -> Vec<RuleIssue> {
        let rule = &ctx.occasion_rule;
        let mut issues = Vec::new();

        for item in set {
            if let Some(keyword) = rule.hard_forbidden_hit(item) {
                issues.push(
                    RuleIssue::error(
                        RuleClass::OccasionForbidden,
                        Severity::Critical,
                        format!("{} ('{}') is never appropriate for {}", label(item), keyword, rule.key),
                    )
                    .with_items([item.id.as_str()]),
                );
            } else if let Some(keyword) = rule.forbidden_hit(item) {
                issues.push(
                    RuleIssue::error(
                        RuleClass::OccasionForbidden,
                        Severity::High,
                        format!("{} ('{}') is not appropriate for {}", label(item), keyword, rule.key),
                    )
                    .with_items([item.id.as_str()]),
                );
            }
        }

        for category in set.missing(ctx.required_categories()) {
            issues.push(RuleIssue::error(
                RuleClass::MissingCategory,
                Severity::High,
                format!("outfit is missing {}", category),
            ));
        }

        let targets = &ctx.targets;
        if set.len() < targets.min_items {
            issues.push(RuleIssue::error(
                RuleClass::ItemCount,
                Severity::High,
                format!("outfit has {} items, needs at least {}", set.len(), targets.min_items),
            ));
        } else if set.len() > targets.max_items {
            issues.push(RuleIssue::warning(
                RuleClass::ItemCount,
                Severity::Low,
                format!("outfit has {} items, more than {}", set.len(), targets.max_items),
            ));
        }

        issues
    }
}

/// Sweater/shirt combinations and layer counts for the temperature band
pub struct LayeringCheck;

impl RuleCheck for LayeringCheck {
    fn name(&self) -> &'static str {
        "layering"
    }

    fn check(&self, set: &CandidateSet, ctx: &GenerationContext, _tables: &RuleTables) -> Vec<RuleIssue> {
        let mut issues = Vec::new();
        let button_ups: Vec<&WardrobeItem> = set.iter().filter(|i| i.is_button_up()).collect();

        for sweater in set.iter().filter(|i| i.is_sweater() && i.category() == Category::Layer) {
            let long_sleeved = button_ups.iter().find(|s| s.sleeve() == SleeveLength::Long);
            if let (SleeveLength::Short, Some(shirt)) = (sweater.sleeve(), long_sleeved) {
                issues.push(
                    RuleIssue::error(
                        RuleClass::Layering,
                        Severity::High,
                        format!("short-sleeve {} over long-sleeve {}", label(sweater), label(shirt)),
                    )
                    .with_items([sweater.id.as_str(), shirt.id.as_str()]),
                );
            } else if !sweater.is_vest() {
                if let Some(shirt) = button_ups.first() {
                    issues.push(
                        RuleIssue::warning(
                            RuleClass::Layering,
                            Severity::Medium,
                            format!("{} over {} hides the collar line", label(sweater), label(shirt)),
                        )
                        .with_items([sweater.id.as_str(), shirt.id.as_str()]),
                    );
                }
            }
        }

        let outerwear = set.of_category(Category::Outerwear);
        if outerwear.len() > 1 {
            issues.push(
                RuleIssue::warning(
                    RuleClass::Layering,
                    Severity::Medium,
                    format!("{} outer layers at once", outerwear.len()),
                )
                .with_items(outerwear.iter().map(|i| i.id.as_str())),
            );
        }

        let band = &ctx.layering_rule;
        let layers = set.layer_count();
        if layers < band.min_layers {
            issues.push(RuleIssue::warning(
                RuleClass::Layering,
                Severity::Medium,
                format!("{} weather calls for at least {} layer(s), found {}", band.name, band.min_layers, layers),
            ));
        } else if layers > band.max_layers {
            issues.push(
                RuleIssue::warning(
                    RuleClass::Layering,
                    Severity::Medium,
                    format!("{} weather allows at most {} layer(s), found {}", band.name, band.max_layers, layers),
                )
                .with_items(set.iter().filter(|i| i.category().is_layering()).map(|i| i.id.as_str())),
            );
        }

        issues
    }
}

/// Clashes, accent count, style palette and mood colors
pub struct ColorCheck {
    pub max_accent_colors: usize,
}

impl RuleCheck for ColorCheck {
    fn name(&self) -> &'static str {
        "color"
    }

    fn check(&self, set: &CandidateSet, ctx: &GenerationContext, tables: &RuleTables) -> Vec<RuleIssue> {
        let theory = &tables.colors;
        let items = set.items();
        let mut issues = Vec::new();

        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                if theory.clashes(&a.color, &b.color) {
                    issues.push(
                        RuleIssue::warning(
                            RuleClass::ColorClash,
                            Severity::Medium,
                            format!("{} {} clashes with {} {}", a.color, label(a), b.color, label(b)),
                        )
                        .with_items([a.id.as_str(), b.id.as_str()]),
                    );
                }
            }
        }

        let accents: BTreeSet<String> = items.iter().filter_map(|i| theory.family(&i.color)).collect();
        if accents.len() > self.max_accent_colors {
            issues.push(RuleIssue::warning(
                RuleClass::ColorClash,
                Severity::Low,
                format!("{} accent colors compete for attention", accents.len()),
            ));
        }

        if let Some(style) = &ctx.style_rule {
            let misfits: Vec<&WardrobeItem> = items
                .iter()
                .filter(|i| !i.color.is_empty() && !theory.in_palette(&i.color, &style.palette))
                .collect();
            if !misfits.is_empty() {
                let colors: Vec<&str> = misfits.iter().map(|i| i.color.as_str()).collect();
                issues.push(
                    RuleIssue::warning(
                        RuleClass::ColorPalette,
                        Severity::Low,
                        format!("{} sits outside the {} palette", colors.join(", "), style.key),
                    )
                    .with_items(misfits.iter().map(|i| i.id.as_str())),
                );
            }
        }

        if let Some(mood) = &ctx.mood_rule {
            for item in items.iter().filter(|i| !i.color.is_empty() && mood.avoids_color(&i.color_lower())) {
                issues.push(
                    RuleIssue::warning(
                        RuleClass::MoodMismatch,
                        Severity::Low,
                        format!("{} works against a {} mood", item.color, mood.key),
                    )
                    .with_items([item.id.as_str()]),
                );
            }
        }

        issues
    }
}

pub struct MaterialCheck;

impl RuleCheck for MaterialCheck {
    fn name(&self) -> &'static str {
        "material"
    }

    fn check(&self, set: &CandidateSet, _ctx: &GenerationContext, tables: &RuleTables) -> Vec<RuleIssue> {
        let items: Vec<(&WardrobeItem, String)> = set
            .iter()
            .filter_map(|i| i.material_lower().map(|m| (i, m)))
            .collect();
        let mut issues = Vec::new();

        for (idx, (a, ma)) in items.iter().enumerate() {
            for (b, mb) in &items[idx + 1..] {
                if tables.materials.conflict(ma, mb) {
                    issues.push(
                        RuleIssue::warning(
                            RuleClass::Material,
                            Severity::Low,
                            format!("{} and {} textures clash", ma, mb),
                        )
                        .with_items([a.id.as_str(), b.id.as_str()]),
                    );
                }
            }
        }

        issues
    }
}

/// Per-item weather suitability
pub struct WeatherCheck;

impl RuleCheck for WeatherCheck {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn check(&self, set: &CandidateSet, ctx: &GenerationContext, tables: &RuleTables) -> Vec<RuleIssue> {
        let mut issues = Vec::new();
        let discouraged: Vec<String> = ctx
            .condition_rules
            .iter()
            .flat_map(|c| c.discouraged_materials.iter().cloned())
            .collect();

        for item in set {
            if let Some(keyword) = ctx.weather_forbidden_hit(item) {
                issues.push(
                    RuleIssue::error(
                        RuleClass::Weather,
                        Severity::High,
                        format!("{} ('{}') is unsuitable for {} weather", label(item), keyword, ctx.layering_rule.name),
                    )
                    .with_items([item.id.as_str()]),
                );
                continue;
            }

            let Some(material) = item.material_lower() else {
                continue;
            };
            let message = if ctx.weather.is_hot() && tables.materials.is_heavy(&material) {
                Some(format!("{} is heavy for {:.0}°F", material, ctx.weather.temperature))
            } else if ctx.weather.is_cold() && tables.materials.is_light(&material) {
                Some(format!("{} is light for {:.0}°F", material, ctx.weather.temperature))
            } else {
                first_match(&material, &discouraged)
                    .map(|m| format!("{} does not hold up in {}", m, ctx.weather.condition))
            };
            if let Some(message) = message {
                issues.push(
                    RuleIssue::warning(RuleClass::Weather, Severity::Low, message).with_items([item.id.as_str()]),
                );
            }
        }

        issues
    }
}

/// Items styled only against the requested style, and mood-avoided pieces
pub struct StyleCheck;

impl RuleCheck for StyleCheck {
    fn name(&self) -> &'static str {
        "style"
    }

    fn check(&self, set: &CandidateSet, ctx: &GenerationContext, _tables: &RuleTables) -> Vec<RuleIssue> {
        let mut issues = Vec::new();

        if let Some(style) = &ctx.style_rule {
            for item in set.iter().filter(|i| style.only_incompatible(i)) {
                issues.push(
                    RuleIssue::warning(
                        RuleClass::StyleMismatch,
                        Severity::Medium,
                        format!("{} is styled against {}", label(item), style.key),
                    )
                    .with_items([item.id.as_str()]),
                );
            }
        }

        if let Some(mood) = &ctx.mood_rule {
            for item in set.iter().filter(|i| matches_any(&i.search_text(), &mood.avoided_keywords)) {
                issues.push(
                    RuleIssue::warning(
                        RuleClass::MoodMismatch,
                        Severity::Low,
                        format!("{} works against a {} mood", label(item), mood.key),
                    )
                    .with_items([item.id.as_str()]),
                );
            }
        }

        issues
    }
}

/// Checks in evaluation order
pub fn standard_checks(max_accent_colors: usize) -> Vec<Box<dyn RuleCheck>> {
    vec![
        Box::new(OccasionCheck),
        Box::new(LayeringCheck),
        Box::new(ColorCheck { max_accent_colors }),
        Box::new(MaterialCheck),
        Box::new(WeatherCheck),
        Box::new(StyleCheck),
    ]
}
