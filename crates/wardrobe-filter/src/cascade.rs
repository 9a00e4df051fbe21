//! Filter Cascade: applies the filters tier by tier until the pool is viable
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use wardrobe_core::{CandidateSet, FilterTier, GenerationContext, WardrobeItem};
use wardrobe_rules::RuleTables;

use crate::filters::{standard_filters, ItemFilter};

/// Default lower bound on a viable pool
pub const DEFAULT_MIN_POOL_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRemoval {
    pub filter: String,
    pub removed: usize,
}

/// One tier attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAttempt {
    pub tier: FilterTier,
    pub pool_size: usize,
    /// Removal counts in filter order
    pub removals: Vec<FilterRemoval>,
}

impl FilterAttempt {
    pub fn removed_by(&self, filter: &str) -> usize {
        self.removals
            .iter()
            .find(|r| r.filter == filter)
            .map_or(0, |r| r.removed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub pool: CandidateSet,
    /// Tier that produced the pool
    pub tier: FilterTier,
    pub attempts: Vec<FilterAttempt>,
}

impl FilterOutcome {
    pub fn loosened(&self) -> bool {
        self.tier != FilterTier::Strict
    }
}

pub struct FilterCascade {
    filters: Vec<Box<dyn ItemFilter>>,
    min_pool_size: usize,
}

impl FilterCascade {
    pub fn new(tables: Arc<RuleTables>) -> Self {
        Self {
            filters: standard_filters(tables),
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
        }
    }

    pub fn with_filters(filters: Vec<Box<dyn ItemFilter>>) -> Self {
        Self {
            filters,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
        }
    }

    pub fn with_min_pool_size(mut self, min_pool_size: usize) -> Self {
        self.min_pool_size = min_pool_size;
        self
    }

    /// Pool size a tier must reach to be used
    pub fn viable_size(&self, ctx: &GenerationContext) -> usize {
        ctx.required_categories().len().max(self.min_pool_size)
    }

    /// Filter the wardrobe at a single tier
    pub fn apply(
        &self,
        wardrobe: &[WardrobeItem],
        ctx: &GenerationContext,
        tier: FilterTier,
    ) -> (CandidateSet, FilterAttempt) {
        let mut pool = CandidateSet::from_items(wardrobe.iter().cloned());
        let mut removals = Vec::with_capacity(self.filters.len());

        if tier != FilterTier::Unfiltered {
            for filter in &self.filters {
                let before = pool.len();
                pool = pool.filtered(|item| match filter.reject(item, ctx, tier) {
                    Some(reason) => {
                        tracing::debug!(
                            item_id = %item.id,
                            filter = filter.name(),
                            tier = %tier,
                            reason = %reason,
                            "item filtered"
                        );
                        false
                    }
                    None => true,
                });
                removals.push(FilterRemoval {
                    filter: filter.name().to_string(),
                    removed: before - pool.len(),
                });
            }
        }

        let attempt = FilterAttempt {
            tier,
            pool_size: pool.len(),
            removals,
        };
        (pool, attempt)
    }

    /// Run tiers in order; the first viable pool wins, else the whole wardrobe
    pub fn run(&self, wardrobe: &[WardrobeItem], ctx: &GenerationContext) -> FilterOutcome {
        let needed = self.viable_size(ctx);
        let mut attempts = Vec::new();

        for tier in FilterTier::ALL {
            let (pool, attempt) = self.apply(wardrobe, ctx, tier);
            let pool_size = attempt.pool_size;
            attempts.push(attempt);

            if pool_size >= needed || tier == FilterTier::Unfiltered {
                if tier != FilterTier::Strict {
                    tracing::info!(tier = %tier, pool_size, needed, "filter cascade loosened");
                }
                return FilterOutcome { pool, tier, attempts };
            }

            tracing::info!(tier = %tier, pool_size, needed, "pool too small, loosening filters");
        }

        // FilterTier::ALL ends with Unfiltered, which always returns above
        FilterOutcome {
            pool: CandidateSet::from_items(wardrobe.iter().cloned()),
            tier: FilterTier::Unfiltered,
            attempts,
        }
    }
}
