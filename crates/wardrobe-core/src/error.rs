//! Unified Error Model
use thiserror::Error;

use crate::stage::StageError;

#[derive(Error, Debug)]
pub enum WardrobeError {
    #[error("INPUT/{0}")]
    InsufficientInput(String),

    #[error("RULES/{0}")]
    RuleLookup(String),

    #[error("STAGE/{0}")]
    Stage(#[from] StageError),

    #[error("STORE/{0}")]
    Store(String),

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),
}

impl WardrobeError {
    /// Insufficient input is surfaced immediately, without any fallback
    pub fn is_insufficient_input(&self) -> bool {
        matches!(self, WardrobeError::InsufficientInput(_))
    }
}
