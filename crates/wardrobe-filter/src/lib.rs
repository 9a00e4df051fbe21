//! Wardrobe Filter: the tiered constraint cascade
//!
//! Filters run in a fixed order (weather, occasion, style, preference, mood,
//! recency). When the surviving pool is too small the cascade loosens one
//! tier at a time: `Strict` → `Relaxed` → `NoRecency` → `Unfiltered`.

pub mod cascade;
pub mod checks;
pub mod filters;

pub use cascade::{FilterAttempt, FilterCascade, FilterOutcome, FilterRemoval, DEFAULT_MIN_POOL_SIZE};
pub use checks::{item_violation, passes_item_checks};
pub use filters::{
    standard_filters, ItemFilter, MoodFilter, OccasionFilter, PreferenceFilter, RecencyFilter, StyleFilter,
    WeatherFilter,
};
