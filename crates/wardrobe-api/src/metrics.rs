//! Prometheus registry backing `/metrics`
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use wardrobe_core::{GenerationEvent, MetricsSink};

/// [`MetricsSink`] that feeds a private Prometheus registry
pub struct PrometheusSink {
    registry: Registry,
    generations: IntCounterVec,
    duration: HistogramVec,
    failed_rules: IntCounterVec,
}

impl PrometheusSink {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let generations = IntCounterVec::new(
            Opts::new("outfit_generations_total", "Outfit generations by outcome"),
            &["strategy", "occasion", "method", "success"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("outfit_generation_duration_ms", "Outfit generation latency in milliseconds")
                .buckets(vec![1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0]),
            &["strategy"],
        )?;
        let failed_rules = IntCounterVec::new(
            Opts::new("outfit_failed_rules_total", "Rule classes still failing in the final validation"),
            &["rule"],
        )?;

        registry.register(Box::new(generations.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(failed_rules.clone()))?;

        Ok(Self {
            registry,
            generations,
            duration,
            failed_rules,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl MetricsSink for PrometheusSink {
    fn record(&self, event: &GenerationEvent) {
        let method = event.generation_method.to_string();
        let success = if event.success { "true" } else { "false" };
        self.generations
            .with_label_values(&[event.strategy.as_str(), event.occasion.as_str(), method.as_str(), success])
            .inc();
        self.duration
            .with_label_values(&[event.strategy.as_str()])
            .observe(event.duration_ms as f64);
        for rule in &event.failed_rules {
            self.failed_rules.with_label_values(&[rule.as_str()]).inc();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_core::GenerationMethod;

    fn event(success: bool, failed_rules: Vec<String>) -> GenerationEvent {
        GenerationEvent {
            strategy: "tiered-cascade".into(),
            occasion: "business".into(),
            style: None,
            mood: None,
            duration_ms: 4,
            success,
            generation_method: GenerationMethod::Fallback,
            failed_rules,
        }
    }

    #[test]
    fn test_records_events() {
        let sink = PrometheusSink::new().unwrap();
        sink.record(&event(true, vec![]));
        sink.record(&event(false, vec!["missing_category".into()]));

        let text = sink.encode().unwrap();
        assert!(text.contains("outfit_generations_total"));
        assert!(text.contains("success=\"false\""));
        assert!(text.contains("rule=\"missing_category\""));
        assert!(text.contains("outfit_generation_duration_ms_count{strategy=\"tiered-cascade\"} 2"));
    }
}
