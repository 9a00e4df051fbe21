//! Wardrobe Stages: selection, structural completion and deduplication
//!
//! Each stage implements [`wardrobe_core::Stage`] and is chained by the
//! [`wardrobe_core::PipelineRunner`]. The completer and deduplicator also
//! expose their logic directly for the healer.

pub mod completer;
pub mod dedup;
pub mod scoring;
pub mod selector;

pub use completer::{Completion, StructuralCompleter};
pub use dedup::{category_limit, Deduplicator, MIN_ITEMS_AFTER_DEDUP};
pub use scoring::{base_score, category_weight, jittered_score, rank, DEFAULT_JITTER};
pub use selector::{complements, CandidateSelector, DEFAULT_ACCESSORY_LIMIT};

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use wardrobe_core::{
        CandidateSet, GenerationContext, GenerationRequest, Stage, StageEnv, UserProfile, WardrobeItem, Weather,
    };
    use wardrobe_rules::{ContextAssembler, RuleTables};

    pub fn context(occasion: &str, temperature: f64, style: Option<&str>, profile: UserProfile) -> GenerationContext {
        let mut request =
            GenerationRequest::new(occasion, Weather::new(temperature, "clear"), vec![]).with_profile(profile);
        request.style = style.map(str::to_string);
        ContextAssembler::new(RuleTables::shared())
            .assemble(&request.with_seed(1))
            .unwrap()
    }

    /// Run a stage with the given items as both input and pool
    pub fn run_stage(stage: &dyn Stage, ctx: &GenerationContext, items: Vec<WardrobeItem>, seed: u64) -> CandidateSet {
        let pool = CandidateSet::from_items(items.clone());
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut env = StageEnv::new(ctx, &items, &pool, &mut rng);
        stage.run(pool.clone(), &mut env).unwrap()
    }
}
