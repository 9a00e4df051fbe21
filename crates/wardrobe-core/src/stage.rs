//! Stage Trait: single contract for every composition stage
use rand::rngs::SmallRng;

use crate::candidate::CandidateSet;
use crate::context::GenerationContext;
use crate::item::WardrobeItem;

/// Read-only inputs plus the request-scoped RNG handed to each stage
pub struct StageEnv<'a> {
    pub ctx: &'a GenerationContext,
    /// Full, unfiltered wardrobe (last-resort source)
    pub wardrobe: &'a [WardrobeItem],
    /// Pool produced by the filter cascade
    pub pool: &'a CandidateSet,
    pub rng: &'a mut SmallRng,
    /// Human-readable notes collected along the way
    pub notes: Vec<String>,
}

impl<'a> StageEnv<'a> {
    pub fn new(
        ctx: &'a GenerationContext,
        wardrobe: &'a [WardrobeItem],
        pool: &'a CandidateSet,
        rng: &'a mut SmallRng,
    ) -> Self {
        Self {
            ctx,
            wardrobe,
            pool,
            rng,
            notes: Vec::new(),
        }
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

/// Contract of a composition stage
pub trait Stage: Send + Sync {
    /// Unique stage id (ex: "select.candidates.v1")
    fn id(&self) -> &'static str;

    /// Whether the output depends only on the input and context (default: true)
    fn deterministic(&self) -> bool {
        true
    }

    /// Runs the stage on a snapshot, returning a new snapshot
    fn run(&self, input: CandidateSet, env: &mut StageEnv<'_>) -> Result<CandidateSet, StageError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageError {
    ValidationFailed(String),
    ExecutionFailed(String),
    DuplicateItem { stage: String, item_id: String },
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "STAGE/VALIDATION: {}", msg),
            Self::ExecutionFailed(msg) => write!(f, "STAGE/EXEC: {}", msg),
            Self::DuplicateItem { stage, item_id } => {
                write!(f, "STAGE/DUPLICATE: {} emitted item {} twice", stage, item_id)
            }
        }
    }
}

impl std::error::Error for StageError {}
