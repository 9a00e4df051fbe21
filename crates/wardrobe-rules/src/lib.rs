//! Wardrobe Rules: static rule tables and context assembly
//!
//! Occasion, style, mood, layering and weather rows are plain data looked
//! up by normalized key (or temperature range). [`ContextAssembler`] turns a
//! raw request into the immutable context every stage reads.

pub mod assembler;
pub mod materials;
pub mod occasions;
pub mod palette;
pub mod personal;
pub mod styles;
pub mod tables;
pub mod weather;

pub use assembler::{target_counts, ContextAssembler, DEFAULT_RECENCY_DAYS};
pub use materials::MaterialTable;
pub use palette::{ColorClass, ColorTheory};
pub use personal::{gender_conflict, normalize_gender, BodyTypeRule, SkinToneRule};
pub use tables::{RuleTables, DEFAULT_OCCASION};
