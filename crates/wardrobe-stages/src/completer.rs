//! Structural Completer: fills required-category gaps, restores the base
//! item and trims the set back under the item ceiling.

use serde::{Deserialize, Serialize};

use wardrobe_core::{CandidateSet, Category, GenerationContext, Stage, StageEnv, StageError, WardrobeItem};

use crate::scoring::{base_score, rank};

/// What one completion pass did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub set: CandidateSet,
    /// Every required category is covered
    pub complete: bool,
    pub missing: Vec<Category>,
    pub added: Vec<String>,
    pub trimmed: Vec<String>,
    pub base_reinserted: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralCompleter;

/// An item can fill `gap` if it is of that category; a one-piece only when
/// both top and bottom are missing
fn fills_gap(item: &WardrobeItem, gap: Category, missing: &[Category]) -> bool {
    match item.category() {
        Category::OnePiece => {
            matches!(gap, Category::Top | Category::Bottom)
                && missing.contains(&Category::Top)
                && missing.contains(&Category::Bottom)
        }
        category => category == gap,
    }
}

impl StructuralCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Restore the base item, fill gaps, then trim
    pub fn complete(
        &self,
        input: CandidateSet,
        ctx: &GenerationContext,
        pool: &CandidateSet,
        wardrobe: &[WardrobeItem],
    ) -> Completion {
        let mut set = input;
        let mut completion = Completion::default();

        if let Some(base) = &ctx.base_item {
            if !set.contains(&base.id) {
                let category = base.category();
                let displaced = rank(set.of_category(category), |i| base_score(i, ctx))
                    .last()
                    .map(|(_, item)| item.id.clone());
                if let Some(id) = displaced {
                    set.remove(&id);
                    completion.trimmed.push(id);
                }
                set.push_front(base.clone());
                completion.base_reinserted = true;
                tracing::debug!(base_item_id = %base.id, "base item reinserted");
            }
        }

        completion.added = self.fill(&mut set, ctx, pool, wardrobe);
        completion.trimmed.extend(self.trim(&mut set, ctx));
        completion.missing = set.missing(ctx.required_categories());
        completion.complete = completion.missing.is_empty();
        completion.set = set;
        completion
    }

    /// Fill missing required categories, pool first then the whole wardrobe
    pub fn fill(
        &self,
        set: &mut CandidateSet,
        ctx: &GenerationContext,
        pool: &CandidateSet,
        wardrobe: &[WardrobeItem],
    ) -> Vec<String> {
        let mut added = Vec::new();

        for gap in ctx.required_categories() {
            let missing = set.missing(ctx.required_categories());
            if !missing.contains(gap) {
                continue;
            }

            let eligible = |item: &&WardrobeItem| !set.contains(&item.id) && fills_gap(item, *gap, &missing);
            let from_pool = rank(pool.iter().filter(eligible), |i| base_score(i, ctx))
                .first()
                .map(|(_, item)| (*item).clone());

            let pick = match from_pool {
                Some(item) => Some(item),
                None => rank(
                    wardrobe
                        .iter()
                        .filter(eligible)
                        .filter(|item| ctx.occasion_rule.hard_forbidden_hit(item).is_none()),
                    |i| base_score(i, ctx),
                )
                .first()
                .map(|(_, item)| {
                    tracing::debug!(item_id = %item.id, gap = %gap, "gap filled from the full wardrobe");
                    (*item).clone()
                }),
            };

            match pick {
                Some(item) => {
                    added.push(item.id.clone());
                    set.push(item);
                }
                None => tracing::debug!(gap = %gap, "no item can fill gap"),
            }
        }

        added
    }

    /// Drop lowest-relevance optional items until the set fits `max_items`
    pub fn trim(&self, set: &mut CandidateSet, ctx: &GenerationContext) -> Vec<String> {
        let required = ctx.required_categories();
        let mut trimmed = Vec::new();

        while set.len() > ctx.targets.max_items {
            let before = set.missing(required).len();
            let victim = rank(set.iter(), |i| base_score(i, ctx))
                .into_iter()
                .rev()
                .map(|(_, item)| item)
                .filter(|item| !ctx.is_base(&item.id))
                .find(|item| {
                    let without = set.filtered(|i| i.id != item.id);
                    without.missing(required).len() <= before
                })
                .map(|item| item.id.clone());

            match victim {
                Some(id) => {
                    set.remove(&id);
                    trimmed.push(id);
                }
                None => break,
            }
        }

        trimmed
    }
}

impl Stage for StructuralCompleter {
    fn id(&self) -> &'static str {
        "complete.structure.v1"
    }

    fn run(&self, input: CandidateSet, env: &mut StageEnv<'_>) -> Result<CandidateSet, StageError> {
        let completion = self.complete(input, env.ctx, env.pool, env.wardrobe);

        if completion.base_reinserted {
            env.note("base item restored after selection");
        }
        if !completion.added.is_empty() {
            env.note(format!("filled gaps with {}", completion.added.join(", ")));
        }
        if !completion.complete {
            let missing: Vec<&str> = completion.missing.iter().map(|c| c.as_str()).collect();
            env.note(format!("still missing: {}", missing.join(", ")));
        }

        Ok(completion.set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use wardrobe_core::UserProfile;

    #[test]
    fn test_fills_from_pool_then_wardrobe() {
        let ctx = context("business", 60.0, None, UserProfile::default());
        let input = CandidateSet::from_items(vec![WardrobeItem::new("shirt", "dress shirt", "Shirt")]);
        let pool = CandidateSet::from_items(vec![
            WardrobeItem::new("shirt", "dress shirt", "Shirt"),
            WardrobeItem::new("pants", "dress pants", "Pants"),
        ]);
        let wardrobe = vec![
            WardrobeItem::new("sneakers", "sneakers", "Sneakers"),
            WardrobeItem::new("loafers", "loafers", "Loafers"),
        ];

        let done = StructuralCompleter::new().complete(input, &ctx, &pool, &wardrobe);
        assert!(done.complete);
        assert_eq!(done.added, vec!["pants", "loafers"]);
        assert!(!done.set.contains("sneakers"));
    }

    #[test]
    fn test_reports_missing_when_nothing_fits() {
        let ctx = context("business", 60.0, None, UserProfile::default());
        let input = CandidateSet::from_items(vec![
            WardrobeItem::new("shirt", "dress shirt", "Shirt"),
            WardrobeItem::new("pants", "dress pants", "Pants"),
        ]);
        let wardrobe = vec![WardrobeItem::new("sneakers", "sneakers", "Sneakers")];

        let done = StructuralCompleter::new().complete(input, &ctx, &CandidateSet::new(), &wardrobe);
        assert!(!done.complete);
        assert_eq!(done.missing, vec![Category::Shoes]);
    }

    #[test]
    fn test_reinserts_displaced_base_item() {
        let mut ctx = context("casual", 70.0, None, UserProfile::default());
        let base = WardrobeItem::new("fav-jeans", "jeans", "Favorite Jeans");
        ctx.base_item = Some(base);
        let input = CandidateSet::from_items(vec![
            WardrobeItem::new("tee", "t-shirt", "Tee"),
            WardrobeItem::new("chinos", "chinos", "Chinos"),
            WardrobeItem::new("shoes", "sneakers", "Sneakers"),
        ]);

        let done = StructuralCompleter::new().complete(input, &ctx, &CandidateSet::new(), &[]);
        assert!(done.base_reinserted);
        assert_eq!(done.set.items()[0].id, "fav-jeans");
        assert!(!done.set.contains("chinos"));
        assert_eq!(done.trimmed, vec!["chinos"]);
    }

    #[test]
    fn test_trim_keeps_base_and_required_coverage() {
        let mut ctx = context("gym", 70.0, None, UserProfile::default());
        let base = WardrobeItem::new("cap", "cap", "Cap");
        ctx.base_item = Some(base.clone());
        let mut set = CandidateSet::from_items(vec![
            base,
            WardrobeItem::new("tank", "tank", "Tank"),
            WardrobeItem::new("shorts", "shorts", "Shorts"),
            WardrobeItem::new("shoes", "sneakers", "Sneakers"),
            WardrobeItem::new("watch", "watch", "Watch"),
            WardrobeItem::new("band", "headband", "Headband"),
        ]);

        let trimmed = StructuralCompleter::new().trim(&mut set, &ctx);
        assert_eq!(set.len(), 4);
        assert_eq!(trimmed.len(), 2);
        assert!(set.contains("cap"));
        assert!(set.missing(ctx.required_categories()).is_empty());
    }
}
