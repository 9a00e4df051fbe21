//! Wardrobe Pipeline: outfit generation end to end
//!
//! [`OutfitGenerator`] is the synchronous, seeded composition pipeline.
//! [`OutfitService`] adds the async edges: store lookups with timeouts and
//! retries, one save per outfit, and metrics.

pub mod config;
pub mod generator;
pub mod reasoning;
pub mod service;

pub use config::{
    FallbackPolicy, FilterConfig, HealingConfig, PipelineConfig, SelectionConfig, StoreConfig, StrictClass,
};
pub use generator::{strict_violations, OutfitGenerator, STRATEGY};
pub use service::{with_retry, InMemoryStore, OutfitService, StoreError, WardrobeStore};
