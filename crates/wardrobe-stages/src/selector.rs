//! Candidate Selector: picks an initial outfit from the filtered pool
use wardrobe_core::{
    CandidateSet, Category, GenerationContext, Stage, StageEnv, StageError, WardrobeItem,
};
use wardrobe_filter::checks::{occasion_violation, style_violation};

use crate::scoring::{jittered_score, rank, DEFAULT_JITTER};

/// Default number of accessories the selector adds
pub const DEFAULT_ACCESSORY_LIMIT: usize = 2;

/// Categories that complete an outfit anchored on the given category
pub fn complements(anchor: Category) -> &'static [Category] {
    match anchor {
        Category::Shoes => &[Category::Bottom, Category::Top],
        Category::Bottom => &[Category::Top, Category::Shoes],
        Category::Top => &[Category::Bottom, Category::Shoes],
        Category::OnePiece => &[Category::Shoes],
        _ => &[Category::Top, Category::Bottom, Category::Shoes],
    }
}

pub struct CandidateSelector {
    jitter: f64,
    accessory_limit: usize,
}

impl CandidateSelector {
    pub fn new(jitter: f64, accessory_limit: usize) -> Self {
        Self {
            jitter: jitter.max(0.0),
            accessory_limit,
        }
    }
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER, DEFAULT_ACCESSORY_LIMIT)
    }
}

fn passes_pick_checks(item: &WardrobeItem, ctx: &GenerationContext) -> bool {
    occasion_violation(item, ctx).is_none() && style_violation(item, ctx).is_none()
}

impl Stage for CandidateSelector {
    fn id(&self) -> &'static str {
        "select.candidates.v1"
    }

    fn deterministic(&self) -> bool {
        false
    }

    fn run(&self, input: CandidateSet, env: &mut StageEnv<'_>) -> Result<CandidateSet, StageError> {
        let ctx = env.ctx;
        let max_items = ctx.targets.max_items;

        let jitter = self.jitter;
        let rng = &mut *env.rng;
        let ranked = rank(input.iter(), |item| jittered_score(item, ctx, jitter, rng));

        let best = |selected: &CandidateSet, category: Category, checked: bool| -> Option<WardrobeItem> {
            ranked
                .iter()
                .map(|(_, item)| *item)
                .filter(|item| item.category() == category && !selected.contains(&item.id))
                .find(|item| !checked || passes_pick_checks(item, ctx))
                .cloned()
        };
        let best_score = |category: Category| -> Option<f64> {
            ranked
                .iter()
                .find(|(_, item)| item.category() == category)
                .map(|(score, _)| *score)
        };

        let mut selected = CandidateSet::new();
        let mut notes = Vec::new();

        if let Some(base) = &ctx.base_item {
            selected.push(base.clone());
            for category in complements(base.category()) {
                if selected.covered_categories().contains(category) {
                    continue;
                }
                match best(&selected, *category, true) {
                    Some(item) => {
                        selected.push(item);
                    }
                    None => notes.push(format!("no {} pairs with the base item", category)),
                }
            }
        }

        let covered = selected.covered_categories();
        let needs_top_and_bottom = !covered.contains(&Category::Top) && !covered.contains(&Category::Bottom);
        if needs_top_and_bottom {
            if let Some(one_piece_score) = best_score(Category::OnePiece) {
                let pair = match (best_score(Category::Top), best_score(Category::Bottom)) {
                    (Some(top), Some(bottom)) => (top + bottom) / 2.0,
                    _ => f64::MIN,
                };
                if one_piece_score > pair {
                    let pick = best(&selected, Category::OnePiece, true)
                        .or_else(|| best(&selected, Category::OnePiece, false));
                    if let Some(item) = pick {
                        selected.push(item);
                    }
                }
            }
        }

        for category in ctx.required_categories() {
            if selected.len() >= max_items {
                break;
            }
            if selected.covered_categories().contains(category) {
                continue;
            }
            if let Some(item) = best(&selected, *category, true).or_else(|| best(&selected, *category, false)) {
                selected.push(item);
            }
        }

        // enhancers while slots and the band's layer ceiling allow, preferred ones first
        let band = &ctx.layering_rule;
        let mut enhancers = [Category::Layer, Category::Outerwear];
        enhancers.sort_by_key(|category| !ctx.occasion_rule.preferred_categories.contains(category));
        for category in enhancers {
            if selected.len() >= max_items || selected.layer_count() >= band.max_layers {
                break;
            }
            if selected.count_category(category) > 0 {
                continue;
            }
            let button_up = selected.iter().any(WardrobeItem::is_button_up);
            let pick = ranked
                .iter()
                .map(|(_, item)| *item)
                .filter(|item| item.category() == category && !selected.contains(&item.id))
                .filter(|item| !(button_up && item.is_sweater() && !item.is_vest()))
                .find(|item| passes_pick_checks(item, ctx))
                .cloned();
            if let Some(item) = pick {
                selected.push(item);
            }
        }

        let mut accessories = selected.count_category(Category::Accessory);
        while accessories < self.accessory_limit && selected.len() < max_items {
            match best(&selected, Category::Accessory, true) {
                Some(item) => {
                    selected.push(item);
                    accessories += 1;
                }
                None => break,
            }
        }

        tracing::debug!(
            selected = selected.len(),
            pool = input.len(),
            base = ctx.base_id().unwrap_or("-"),
            "candidates selected"
        );
        for note in notes {
            env.note(note);
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, run_stage};
    use wardrobe_core::UserProfile;

    fn pool() -> Vec<WardrobeItem> {
        vec![
            WardrobeItem::new("shirt-1", "shirt", "Oxford Shirt").with_color("white"),
            WardrobeItem::new("shirt-2", "t-shirt", "Tee").with_color("gray"),
            WardrobeItem::new("pants-1", "chinos", "Chinos").with_color("khaki"),
            WardrobeItem::new("jeans", "jeans", "Jeans").with_color("blue"),
            WardrobeItem::new("shoes", "sneakers", "Sneakers").with_color("white"),
            WardrobeItem::new("belt", "belt", "Leather Belt").with_color("brown"),
            WardrobeItem::new("watch", "watch", "Watch").with_color("silver"),
            WardrobeItem::new("scarf", "scarf", "Scarf").with_color("red"),
        ]
    }

    #[test]
    fn test_selects_one_core_item_per_category() {
        let ctx = context("casual", 70.0, None, UserProfile::default());
        let out = run_stage(&CandidateSelector::default(), &ctx, pool(), 11);

        assert_eq!(out.count_category(Category::Top), 1);
        assert_eq!(out.count_category(Category::Bottom), 1);
        assert_eq!(out.count_category(Category::Shoes), 1);
        assert_eq!(out.count_category(Category::Accessory), 2);
        assert_eq!(out.len(), 5);
        assert!(out.find_duplicate_id().is_none());
    }

    #[test]
    fn test_base_item_anchors_selection() {
        let mut ctx = context("casual", 70.0, None, UserProfile::default());
        ctx.base_item = Some(WardrobeItem::new("jeans", "jeans", "Jeans").with_color("blue"));
        let out = run_stage(&CandidateSelector::default(), &ctx, pool(), 3);

        assert_eq!(out.items()[0].id, "jeans");
        assert_eq!(out.count_category(Category::Bottom), 1);
        assert_eq!(out.count_category(Category::Top), 1);
        assert_eq!(out.count_category(Category::Shoes), 1);
    }

    #[test]
    fn test_one_piece_covers_top_and_bottom() {
        let ctx = context("date night", 72.0, None, UserProfile::default());
        let items = vec![
            WardrobeItem::new("dress", "dress", "Wrap Dress").with_favorite(1.0),
            WardrobeItem::new("top", "blouse", "Blouse").with_wear(5, None),
            WardrobeItem::new("skirt", "skirt", "Skirt").with_wear(5, None),
            WardrobeItem::new("heels", "heels", "Heels"),
        ];
        let out = run_stage(&CandidateSelector::new(0.0, 2), &ctx, items, 1);

        assert!(out.contains("dress"));
        assert!(!out.contains("top"));
        assert!(!out.contains("skirt"));
        assert!(out.missing(ctx.required_categories()).is_empty());
    }

    #[test]
    fn test_respects_max_items() {
        let ctx = context("gym", 70.0, None, UserProfile::default());
        let items = vec![
            WardrobeItem::new("tank", "tank", "Training Tank"),
            WardrobeItem::new("shorts", "shorts", "Running Shorts"),
            WardrobeItem::new("trainers", "sneakers", "Trainers"),
            WardrobeItem::new("cap", "cap", "Running Cap").with_occasions(["gym"]),
            WardrobeItem::new("band", "watch", "Sports Watch").with_occasions(["gym"]),
        ];
        let out = run_stage(&CandidateSelector::default(), &ctx, items, 5);
        assert_eq!(out.len(), ctx.targets.max_items);
    }

    #[test]
    fn test_adds_enhancer_when_slots_remain() {
        let ctx = context("casual", 70.0, None, UserProfile::default());
        let items = vec![
            WardrobeItem::new("tee", "t-shirt", "Crew Tee"),
            WardrobeItem::new("jeans", "jeans", "Straight Jeans"),
            WardrobeItem::new("shoes", "sneakers", "Canvas Sneakers"),
            WardrobeItem::new("cardigan", "cardigan", "Cotton Cardigan"),
        ];
        let out = run_stage(&CandidateSelector::default(), &ctx, items, 2);

        assert!(out.contains("cardigan"));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_no_enhancer_above_band_ceiling() {
        let ctx = context("casual", 90.0, None, UserProfile::default());
        let items = vec![
            WardrobeItem::new("tee", "t-shirt", "Crew Tee"),
            WardrobeItem::new("shorts", "shorts", "Linen Shorts"),
            WardrobeItem::new("shoes", "sneakers", "Canvas Sneakers"),
            WardrobeItem::new("shirt", "overshirt", "Chambray Overshirt"),
            WardrobeItem::new("jacket", "jacket", "Denim Jacket"),
            WardrobeItem::new("vest", "vest", "Linen Vest"),
        ];
        let out = run_stage(&CandidateSelector::default(), &ctx, items, 2);

        assert!(out.layer_count() <= ctx.layering_rule.max_layers);
    }

    #[test]
    fn test_checked_one_piece_preferred() {
        let ctx = context("business", 65.0, None, UserProfile::default());
        let items = vec![
            WardrobeItem::new("tank-dress", "dress", "Tank Dress").with_favorite(1.0),
            WardrobeItem::new("sheath", "dress", "Sheath Dress"),
            WardrobeItem::new("loafers", "loafers", "Loafers"),
        ];
        let out = run_stage(&CandidateSelector::new(0.0, 0), &ctx, items, 1);

        assert!(out.contains("sheath"));
        assert!(!out.contains("tank-dress"));
    }
}
