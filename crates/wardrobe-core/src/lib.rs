//! Wardrobe Core: data model, stage contract and runner
//!
//! Shared vocabulary for every stage of outfit composition. Stages consume
//! and return [`CandidateSet`] snapshots; the [`PipelineRunner`] chains them
//! and checks the no-duplicate-id invariant at every boundary.

pub mod candidate;
pub mod context;
pub mod data_model;
pub mod error;
pub mod healing;
pub mod item;
pub mod metrics;
pub mod outfit;
pub mod rules;
pub mod runner;
pub mod stage;
pub mod text;
pub mod validation;

pub use candidate::CandidateSet;
pub use context::{GenerationContext, TargetCounts};
pub use data_model::{GenerationRequest, OutfitHistoryEntry, UserProfile, Weather};
pub use error::WardrobeError;
pub use healing::{HealAction, HealEntry, HealingLog};
pub use item::{Category, SleeveLength, WardrobeItem};
pub use metrics::{GenerationEvent, MetricsSink, NoopSink, TracingSink};
pub use outfit::{FilterTier, GeneratedOutfit, GenerationMethod, OutfitItem, OutfitMetadata};
pub use rules::{ConditionRule, LayeringRule, MoodRule, OccasionCategory, OccasionRule, StyleRule};
pub use runner::{PipelineRunner, StageTrace};
pub use stage::{Stage, StageEnv, StageError};
pub use validation::{HarmonyBreakdown, RuleClass, RuleIssue, Severity, ValidationResult};

/// Engine version stamped into generated outfits
pub const ENGINE_VERSION: &str = "1.0.0";
