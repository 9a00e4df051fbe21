//! Wardrobe Heal: bounded repair of outfits that fail validation
//!
//! Every repair is recorded in a [`wardrobe_core::HealingLog`] so rejected
//! outfits can be diagnosed.

pub mod healer;

pub use healer::{HealOutcome, Healer, DEFAULT_MAX_ROUNDS};
