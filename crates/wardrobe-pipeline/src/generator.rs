//! Outfit generator
//!
//! Synchronous orchestration of one request:
//! context → filter cascade → select/complete/dedup → validate → heal →
//! strict gate → outfit. Given a seed the result is reproducible apart from
//! the outfit id and creation time.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use uuid::Uuid;

use wardrobe_core::{
    CandidateSet, GeneratedOutfit, GenerationContext, GenerationMethod, GenerationRequest, OutfitItem,
    OutfitMetadata, PipelineRunner, RuleIssue, StageEnv, ValidationResult, WardrobeError, ENGINE_VERSION,
};
use wardrobe_filter::FilterCascade;
use wardrobe_heal::Healer;
use wardrobe_quality::ValidationEngine;
use wardrobe_rules::{ContextAssembler, RuleTables};
use wardrobe_stages::{CandidateSelector, Deduplicator, StructuralCompleter};

use crate::config::{FallbackPolicy, PipelineConfig};
use crate::reasoning::{color_summary, item_reasoning, outfit_reasoning, style_summary};

/// Strategy name reported to metrics sinks
pub const STRATEGY: &str = "tiered-cascade";

pub struct OutfitGenerator {
    config: PipelineConfig,
    tables: Arc<RuleTables>,
    assembler: ContextAssembler,
    cascade: FilterCascade,
    runner: PipelineRunner,
    engine: ValidationEngine,
    healer: Healer,
}

impl OutfitGenerator {
    pub fn new(tables: Arc<RuleTables>, config: PipelineConfig) -> Result<Self, WardrobeError> {
        config.validate()?;

        let assembler = ContextAssembler::new(tables.clone()).with_recency_days(config.filter.recency_days);
        let cascade = FilterCascade::new(tables.clone()).with_min_pool_size(config.filter.min_pool_size);
        let runner = PipelineRunner::new(vec![
            Box::new(CandidateSelector::new(config.selection.jitter, config.selection.accessory_limit)),
            Box::new(StructuralCompleter::new()),
            Box::new(Deduplicator::new()),
        ]);
        let engine = ValidationEngine::with_config(tables.clone(), config.scoring.clone())?;
        let healer = Healer::new(config.healing.max_rounds);

        tracing::debug!(pipeline = runner.pipeline_id(), rules = %tables.version, "outfit generator ready");

        Ok(Self {
            config,
            tables,
            assembler,
            cascade,
            runner,
            engine,
            healer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn tables(&self) -> &Arc<RuleTables> {
        &self.tables
    }

    pub fn pipeline_id(&self) -> &str {
        self.runner.pipeline_id()
    }

    /// Generate an outfit; every failure becomes a failed outfit
    pub fn generate(&self, request: &GenerationRequest) -> GeneratedOutfit {
        match self.try_generate(request) {
            Ok(outfit) => outfit,
            Err(err) => {
                if err.is_insufficient_input() {
                    tracing::debug!(error = %err, "insufficient input");
                } else {
                    tracing::warn!(error = %err, occasion = %request.occasion, "outfit generation failed");
                }
                let mut outfit = GeneratedOutfit::failed(request.occasion.clone(), vec![err.to_string()], Utc::now());
                outfit.user_id = request.user_profile.user_id.clone();
                outfit.style = request.style.clone();
                outfit.mood = request.mood.clone();
                outfit
            }
        }
    }

    /// Validate the request's wardrobe as if it were a finished outfit
    pub fn validate_items(&self, request: &GenerationRequest) -> Result<ValidationResult, WardrobeError> {
        let ctx = self.assembler.assemble(request)?;
        let set = CandidateSet::from_items(request.wardrobe.iter().cloned());
        if let Some(id) = set.find_duplicate_id() {
            return Err(WardrobeError::InsufficientInput(format!("item '{}' appears twice", id)));
        }
        Ok(self.engine.validate(&set, &ctx))
    }

    pub fn try_generate(&self, request: &GenerationRequest) -> Result<GeneratedOutfit, WardrobeError> {
        let wardrobe = &request.wardrobe;
        if wardrobe.is_empty() {
            return Err(WardrobeError::InsufficientInput("wardrobe is empty".into()));
        }
        if wardrobe.len() < self.config.min_wardrobe_size {
            return Err(WardrobeError::InsufficientInput(format!(
                "wardrobe has {} items, at least {} are needed",
                wardrobe.len(),
                self.config.min_wardrobe_size
            )));
        }

        let ctx = self.assembler.assemble(request)?;
        let filtered = self.cascade.run(wardrobe, &ctx);

        let mut rng = SmallRng::seed_from_u64(ctx.seed);
        let mut env = StageEnv::new(&ctx, wardrobe, &filtered.pool, &mut rng);
        let (set, stage_trace) = self.runner.run(filtered.pool.clone(), &mut env)?;
        let mut notes = std::mem::take(&mut env.notes);

        let initial = self.engine.validate(&set, &ctx);
        let (set, result, method, healing_log) = if initial.error_count() == 0 {
            (set, initial, GenerationMethod::Primary, None)
        } else {
            let outcome = self.healer.heal(&self.engine, set, initial, &ctx, &filtered.pool, wardrobe);
            let method = if outcome.accepted_round == 1 && outcome.result.error_count() == 0 {
                GenerationMethod::Fallback
            } else {
                GenerationMethod::FinalFallback
            };
            notes.push(outcome.log.summary());
            (outcome.set, outcome.result, method, Some(outcome.log))
        };

        let mut metadata = OutfitMetadata {
            harmony: result.harmony,
            style_compatibility: style_summary(&set, &ctx),
            filter_tier: filtered.tier,
            stage_trace,
            healing_log,
            base_item_dropped: dropped_base(request, &ctx, &set),
            rejected_items: Vec::new(),
            failed_rules: result.failed_classes(),
            notes,
            seed: ctx.seed,
            engine_version: ENGINE_VERSION.to_string(),
        };
        if let Some(reason) = &metadata.base_item_dropped {
            tracing::warn!(reason = %reason, "base item dropped");
        }

        let mut errors = result.errors.clone();
        let mut warnings = result.warnings.clone();

        let strict = strict_violations(&self.config.fallback, &result);
        if !strict.is_empty() {
            tracing::info!(
                violations = strict.len(),
                items = set.len(),
                "strict policy rejected the outfit"
            );
            metadata.rejected_items = set.ids();
            if let Some(id) = ctx.base_id() {
                metadata.base_item_dropped = Some(format!("{}: rejected with the outfit", id));
            }
            errors.insert(0, "no acceptable outfit: occasion-inappropriate items could not be replaced".to_string());
            return Ok(self.outfit(
                request,
                &ctx,
                CandidateSet::new(),
                &result,
                GenerationMethod::FinalFallback,
                metadata,
                errors,
                warnings,
                false,
            ));
        }

        let missing = set.missing(ctx.required_categories());
        let success = if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
            tracing::debug!(missing = ?names, "outfit structurally incomplete");
            false
        } else if !result.is_valid {
            false
        } else if result.confidence < self.config.min_confidence {
            warnings.push(format!(
                "confidence {:.1} is below the minimum of {:.1}",
                result.confidence, self.config.min_confidence
            ));
            false
        } else {
            true
        };

        if success {
            errors.clear();
        }
        Ok(self.outfit(request, &ctx, set, &result, method, metadata, errors, warnings, success))
    }

    #[allow(clippy::too_many_arguments)]
    fn outfit(
        &self,
        request: &GenerationRequest,
        ctx: &GenerationContext,
        set: CandidateSet,
        result: &ValidationResult,
        method: GenerationMethod,
        metadata: OutfitMetadata,
        errors: Vec<String>,
        warnings: Vec<String>,
        success: bool,
    ) -> GeneratedOutfit {
        let items: Vec<OutfitItem> = set
            .iter()
            .map(|item| OutfitItem::from_item(item, item_reasoning(item, ctx)))
            .collect();
        let reasoning = if set.is_empty() && !errors.is_empty() {
            format!("{} {}", outfit_reasoning(&set, ctx, method), errors[0])
        } else {
            outfit_reasoning(&set, ctx, method)
        };

        GeneratedOutfit {
            id: Uuid::new_v4(),
            user_id: request.user_profile.user_id.clone(),
            occasion: ctx.occasion.clone(),
            style: ctx.style.clone(),
            mood: ctx.mood.clone(),
            item_ids: set.ids(),
            items,
            reasoning,
            style_summary: metadata.style_compatibility.clone(),
            color_harmony: color_summary(&set, &self.tables, &result.harmony),
            was_successful: success,
            validation_errors: errors,
            warnings,
            confidence_score: if set.is_empty() { 0.0 } else { result.confidence },
            generation_method: method,
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Blocking issues matching one of the policy's strict classes
pub fn strict_violations<'a>(policy: &FallbackPolicy, result: &'a ValidationResult) -> Vec<&'a RuleIssue> {
    policy
        .strict_classes
        .iter()
        .flat_map(|strict| result.blocking_at_least(strict.class, strict.min_severity))
        .collect()
}

fn dropped_base(request: &GenerationRequest, ctx: &GenerationContext, set: &CandidateSet) -> Option<String> {
    let id = request.base_item_id.as_deref()?;
    match &ctx.base_item {
        None => Some(format!("{}: not in wardrobe", id)),
        Some(base) if !set.contains(&base.id) => Some(format!("{}: could not be kept", id)),
        Some(_) => None,
    }
}
