//! Healing log: a record of every repair the fallback healer attempted.
//!
//! Attached to failed outfits so a rejected or partially repaired result can
//! be diagnosed after the fact.

use serde::{Deserialize, Serialize};

use crate::validation::RuleClass;

/// A single repair action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HealAction {
    /// Offending item swapped for a pool item
    Substituted { from: String, to: String },
    /// Offending item dropped
    Removed { item_id: String },
    /// Missing category filled
    Added { item_id: String },
    /// Item dropped to respect the item-count ceiling
    Trimmed { item_id: String },
    /// Nothing applicable was found
    NoRepair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealEntry {
    /// 1-based round number
    pub round: usize,
    pub class: RuleClass,
    pub action: HealAction,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealingLog {
    pub entries: Vec<HealEntry>,
    /// Error count before the first round
    pub initial_errors: usize,
    /// Error count of the accepted result
    pub final_errors: usize,
    /// Rounds that were attempted
    pub rounds_attempted: usize,
    /// Rounds whose result was kept
    pub rounds_accepted: usize,
}

impl HealingLog {
    pub fn new(initial_errors: usize) -> Self {
        Self {
            initial_errors,
            final_errors: initial_errors,
            ..Self::default()
        }
    }

    pub fn record(
        &mut self,
        round: usize,
        class: RuleClass,
        action: HealAction,
        reason: impl Into<String>,
    ) {
        self.entries.push(HealEntry {
            round,
            class,
            action,
            reason: reason.into(),
        });
    }

    pub fn improved(&self) -> bool {
        self.final_errors < self.initial_errors
    }

    /// Entries that changed the outfit
    pub fn actions(&self) -> impl Iterator<Item = &HealEntry> {
        self.entries.iter().filter(|e| e.action != HealAction::NoRepair)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} round(s) attempted, {} accepted; errors {} -> {}",
            self.rounds_attempted, self.rounds_accepted, self.initial_errors, self.final_errors
        )
    }
}
