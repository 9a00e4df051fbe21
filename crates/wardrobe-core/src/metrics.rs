//! Metrics sink contract. Generation emits one event per request; sinks are
//! fire-and-forget and must tolerate their backend being unavailable.
use serde::{Deserialize, Serialize};

use crate::outfit::GenerationMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationEvent {
    /// Strategy name (ex: "tiered-cascade")
    pub strategy: String,
    pub occasion: String,
    pub style: Option<String>,
    pub mood: Option<String>,
    pub duration_ms: u64,
    pub success: bool,
    pub generation_method: GenerationMethod,
    /// Rule classes that still failed
    pub failed_rules: Vec<String>,
}

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: &GenerationEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn record(&self, _event: &GenerationEvent) {}
}

/// Emits events as structured tracing records
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MetricsSink for TracingSink {
    fn record(&self, event: &GenerationEvent) {
        tracing::info!(
            strategy = %event.strategy,
            occasion = %event.occasion,
            style = event.style.as_deref().unwrap_or("-"),
            mood = event.mood.as_deref().unwrap_or("-"),
            duration_ms = event.duration_ms,
            success = event.success,
            method = %event.generation_method,
            failed_rules = ?event.failed_rules,
            "outfit generation"
        );
    }
}
