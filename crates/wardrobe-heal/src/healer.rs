//! Fallback healer
//!
//! Targeted repairs for the blocking issues of a validation result, applied
//! in at most `max_rounds` rounds. Each round starts from the best set seen
//! so far and is kept only when it lowers the error count. Rounds draw
//! substitutes from the filtered pool; the final round may reach into the
//! whole wardrobe. A round that does not lower the error count moves straight
//! to the final round, and healing stops after it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wardrobe_core::{
    CandidateSet, Category, GenerationContext, HealAction, HealingLog, RuleClass, RuleIssue, ValidationResult,
    WardrobeItem,
};
use wardrobe_filter::passes_item_checks;
use wardrobe_quality::ValidationEngine;
use wardrobe_stages::{base_score, category_limit, rank, StructuralCompleter};

pub const DEFAULT_MAX_ROUNDS: usize = 2;

/// Accepted set after healing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealOutcome {
    pub set: CandidateSet,
    pub result: ValidationResult,
    pub log: HealingLog,
    /// Round that produced `set`, 0 when no round was accepted
    pub accepted_round: usize,
}

impl HealOutcome {
    pub fn healed(&self) -> bool {
        self.accepted_round > 0
    }
}

/// Sources a round may draw items from
struct Sources<'a> {
    pool: &'a CandidateSet,
    wardrobe: &'a [WardrobeItem],
    final_pass: bool,
}

impl<'a> Sources<'a> {
    fn items(&self) -> impl Iterator<Item = &'a WardrobeItem> {
        let wardrobe: &'a [WardrobeItem] = if self.final_pass { self.wardrobe } else { &[] };
        self.pool.iter().chain(wardrobe.iter())
    }
}

#[derive(Debug, Clone)]
pub struct Healer {
    max_rounds: usize,
    completer: StructuralCompleter,
}

impl Default for Healer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl Healer {
    pub fn new(max_rounds: usize) -> Self {
        Self {
            max_rounds,
            completer: StructuralCompleter::new(),
        }
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn heal(
        &self,
        engine: &ValidationEngine,
        set: CandidateSet,
        initial: ValidationResult,
        ctx: &GenerationContext,
        pool: &CandidateSet,
        wardrobe: &[WardrobeItem],
    ) -> HealOutcome {
        let mut log = HealingLog::new(initial.error_count());
        let mut best_set = set;
        let mut best = initial;
        let mut accepted_round = 0;
        let mut round = 0;
        let mut final_pass = false;

        while round < self.max_rounds && best.error_count() > 0 {
            round += 1;
            final_pass |= round == self.max_rounds && round > 1;
            log.rounds_attempted = round;

            let sources = Sources {
                pool,
                wardrobe,
                final_pass,
            };
            let mut candidate = best_set.clone();
            let improved = if self.repair(round, &mut candidate, &best, ctx, &sources, &mut log) {
                let result = engine.validate(&candidate, ctx);
                if result.error_count() < best.error_count() {
                    tracing::info!(
                        round,
                        before = best.error_count(),
                        after = result.error_count(),
                        "heal round accepted"
                    );
                    best_set = candidate;
                    best = result;
                    accepted_round = round;
                    log.rounds_accepted += 1;
                    true
                } else {
                    tracing::info!(round, errors = result.error_count(), "heal round rejected");
                    false
                }
            } else {
                tracing::info!(round, "no repair applicable");
                false
            };

            if final_pass {
                break;
            }
            if !improved {
                // retrying from the same set repeats the same repair
                if round >= self.max_rounds {
                    break;
                }
                final_pass = true;
            }
        }

        log.final_errors = best.error_count();
        HealOutcome {
            set: best_set,
            result: best,
            log,
            accepted_round,
        }
    }

    /// One round of repairs; true when the set changed
    fn repair(
        &self,
        round: usize,
        set: &mut CandidateSet,
        result: &ValidationResult,
        ctx: &GenerationContext,
        sources: &Sources<'_>,
        log: &mut HealingLog,
    ) -> bool {
        let issues: Vec<RuleIssue> = result.blocking_issues().cloned().collect();
        let mut handled: HashSet<String> = HashSet::new();
        let mut filled = false;
        let mut changed = false;

        for issue in &issues {
            match issue.class {
                RuleClass::OccasionForbidden | RuleClass::Weather => {
                    for id in &issue.item_ids {
                        if handled.insert(id.clone()) {
                            changed |= self.replace_offender(round, issue.class, id, set, ctx, sources, log);
                        }
                    }
                }
                RuleClass::Layering => {
                    if let Some(layer) = issue.item_ids.first() {
                        if handled.insert(layer.clone()) {
                            changed |= self.swap_layer(round, issue, set, ctx, sources, log);
                        }
                    }
                }
                RuleClass::MissingCategory | RuleClass::ItemCount if !filled => {
                    filled = true;
                    changed |= self.fill(round, issue.class, set, ctx, sources, log);
                }
                RuleClass::MissingCategory | RuleClass::ItemCount => {}
                class => log.record(round, class, HealAction::NoRepair, issue.message.clone()),
            }
        }

        for id in self.completer.trim(set, ctx) {
            log.record(
                round,
                RuleClass::ItemCount,
                HealAction::Trimmed { item_id: id },
                format!("outfit above {} items", ctx.targets.max_items),
            );
            changed = true;
        }

        changed
    }

    /// Best eligible source item of `category` not yet in the set
    fn best_substitute(
        &self,
        set: &CandidateSet,
        ctx: &GenerationContext,
        sources: &Sources<'_>,
        accept: impl Fn(&WardrobeItem) -> bool,
    ) -> Option<WardrobeItem> {
        rank(
            sources
                .items()
                .filter(|item| !set.contains(&item.id) && accept(item) && passes_item_checks(item, ctx)),
            |item| base_score(item, ctx),
        )
        .first()
        .map(|(_, item)| (*item).clone())
    }

    #[allow(clippy::too_many_arguments)]
    fn replace_offender(
        &self,
        round: usize,
        class: RuleClass,
        id: &str,
        set: &mut CandidateSet,
        ctx: &GenerationContext,
        sources: &Sources<'_>,
        log: &mut HealingLog,
    ) -> bool {
        if ctx.is_base(id) {
            log.record(round, class, HealAction::NoRepair, format!("{} is the base item and stays", id));
            return false;
        }
        let Some(category) = set.get(id).map(WardrobeItem::category) else {
            return false;
        };

        match self.best_substitute(set, ctx, sources, |item| item.category() == category) {
            Some(substitute) => {
                let to = substitute.id.clone();
                set.replace(id, substitute);
                log.record(
                    round,
                    class,
                    HealAction::Substituted { from: id.to_string(), to: to.clone() },
                    format!("{} replaced by {}", id, to),
                );
            }
            None => {
                set.remove(id);
                log.record(
                    round,
                    class,
                    HealAction::Removed { item_id: id.to_string() },
                    format!("no suitable {} to replace {}", category, id),
                );
            }
        }
        true
    }

    /// Swap the offending layer for a vest or a non-sweater layer
    fn swap_layer(
        &self,
        round: usize,
        issue: &RuleIssue,
        set: &mut CandidateSet,
        ctx: &GenerationContext,
        sources: &Sources<'_>,
        log: &mut HealingLog,
    ) -> bool {
        let layer = &issue.item_ids[0];

        if ctx.is_base(layer) {
            // keep the base sweater and change the shirt underneath instead
            let Some(shirt) = issue.item_ids.get(1) else {
                log.record(round, issue.class, HealAction::NoRepair, "base layer has no partner to change");
                return false;
            };
            let plain_top = |item: &WardrobeItem| item.category() == Category::Top && !item.is_button_up();
            return match self.best_substitute(set, ctx, sources, plain_top) {
                Some(top) => {
                    let to = top.id.clone();
                    set.replace(shirt, top);
                    log.record(
                        round,
                        issue.class,
                        HealAction::Substituted { from: shirt.clone(), to },
                        "shirt under the base layer changed",
                    );
                    true
                }
                None => {
                    log.record(round, issue.class, HealAction::NoRepair, issue.message.clone());
                    false
                }
            };
        }

        let compatible = |item: &WardrobeItem| item.category() == Category::Layer && (item.is_vest() || !item.is_sweater());
        match self.best_substitute(set, ctx, sources, compatible) {
            Some(substitute) => {
                let to = substitute.id.clone();
                set.replace(layer, substitute);
                log.record(
                    round,
                    issue.class,
                    HealAction::Substituted { from: layer.clone(), to },
                    issue.message.clone(),
                );
            }
            None => {
                set.remove(layer);
                log.record(
                    round,
                    issue.class,
                    HealAction::Removed { item_id: layer.clone() },
                    issue.message.clone(),
                );
            }
        }
        true
    }

    /// Cover missing categories, then pad up to the item minimum
    fn fill(
        &self,
        round: usize,
        class: RuleClass,
        set: &mut CandidateSet,
        ctx: &GenerationContext,
        sources: &Sources<'_>,
        log: &mut HealingLog,
    ) -> bool {
        // the pool may come from the unfiltered tier, so both sources are vetted
        let pool = sources.pool.filtered(|item| passes_item_checks(item, ctx));
        let wardrobe: Vec<WardrobeItem> = if sources.final_pass {
            sources
                .wardrobe
                .iter()
                .filter(|item| passes_item_checks(item, ctx))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        let mut added = self.completer.fill(set, ctx, &pool, &wardrobe);

        while set.len() < ctx.targets.min_items {
            let covered = set.covered_categories();
            let room = |item: &WardrobeItem| {
                let category = item.category();
                let clashes = match category {
                    Category::OnePiece => covered.contains(&Category::Top) || covered.contains(&Category::Bottom),
                    Category::Top | Category::Bottom => set.count_category(Category::OnePiece) > 0,
                    _ => false,
                };
                !clashes && set.count_category(category) < category_limit(category, ctx)
            };
            match self.best_substitute(set, ctx, sources, room) {
                Some(item) => {
                    added.push(item.id.clone());
                    set.push(item);
                }
                None => break,
            }
        }

        if added.is_empty() {
            log.record(round, class, HealAction::NoRepair, "nothing available to fill the outfit");
            return false;
        }
        for id in added {
            log.record(round, class, HealAction::Added { item_id: id.clone() }, format!("{} added", id));
        }
        true
    }
}
