//! Async outfit service
//!
//! Wraps the synchronous generator with store lookups, metrics and a single
//! save. Store calls run under a timeout and are retried with exponential
//! backoff; a failing history lookup degrades to an empty history, a failing
//! wardrobe lookup yields a failed outfit.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use wardrobe_core::{
    GeneratedOutfit, GenerationEvent, GenerationRequest, MetricsSink, OutfitHistoryEntry, WardrobeError,
    WardrobeItem,
};

use crate::config::StoreConfig;
use crate::generator::{OutfitGenerator, STRATEGY};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("user '{0}' not found")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call timed out after {0} ms")]
    Timeout(u64),
}

impl From<StoreError> for WardrobeError {
    fn from(err: StoreError) -> Self {
        WardrobeError::Store(err.to_string())
    }
}

/// Persistence collaborator (wardrobes, outfit history, generated outfits)
#[async_trait]
pub trait WardrobeStore: Send + Sync {
    async fn wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>, StoreError>;

    async fn history(&self, user_id: &str) -> Result<Vec<OutfitHistoryEntry>, StoreError>;

    async fn save_outfit(&self, outfit: &GeneratedOutfit) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    wardrobes: RwLock<HashMap<String, Vec<WardrobeItem>>>,
    history: RwLock<HashMap<String, Vec<OutfitHistoryEntry>>>,
    outfits: RwLock<Vec<GeneratedOutfit>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_wardrobe(&self, user_id: impl Into<String>, items: Vec<WardrobeItem>) {
        self.wardrobes.write().await.insert(user_id.into(), items);
    }

    pub async fn push_history(&self, user_id: impl Into<String>, entry: OutfitHistoryEntry) {
        self.history.write().await.entry(user_id.into()).or_default().push(entry);
    }

    pub async fn outfits(&self) -> Vec<GeneratedOutfit> {
        self.outfits.read().await.clone()
    }
}

#[async_trait]
impl WardrobeStore for InMemoryStore {
    async fn wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>, StoreError> {
        self.wardrobes
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))
    }

    async fn history(&self, user_id: &str) -> Result<Vec<OutfitHistoryEntry>, StoreError> {
        Ok(self.history.read().await.get(user_id).cloned().unwrap_or_default())
    }

    async fn save_outfit(&self, outfit: &GeneratedOutfit) -> Result<(), StoreError> {
        self.outfits.write().await.push(outfit.clone());
        Ok(())
    }
}

/// Run a store call under the configured timeout, retrying transient failures
pub async fn with_retry<T, F, Fut>(config: &StoreConfig, operation: &str, mut call: F) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut backoff = Duration::from_millis(config.backoff_ms);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let outcome = match tokio::time::timeout(Duration::from_millis(config.timeout_ms), call()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(config.timeout_ms)),
        };

        match outcome {
            Ok(value) => return Ok(value),
            // a missing user will not appear on retry
            Err(err @ StoreError::NotFound(_)) => return Err(err),
            Err(err) if attempt > config.retries => {
                tracing::warn!(operation, attempts = attempt, error = %err, "store call failed");
                return Err(err);
            }
            Err(err) => {
                tracing::debug!(operation, attempt, error = %err, "store call failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }
    }
}

pub struct OutfitService<S: WardrobeStore> {
    generator: Arc<OutfitGenerator>,
    store: Arc<S>,
    metrics: Arc<dyn MetricsSink>,
}

impl<S: WardrobeStore> Clone for OutfitService<S> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            store: self.store.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S: WardrobeStore> OutfitService<S> {
    pub fn new(generator: Arc<OutfitGenerator>, store: Arc<S>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            generator,
            store,
            metrics,
        }
    }

    pub fn generator(&self) -> &OutfitGenerator {
        &self.generator
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn store_config(&self) -> &StoreConfig {
        &self.generator.config().store
    }

    /// Generate from a self-contained request, record metrics and save once
    pub async fn generate(&self, request: GenerationRequest) -> GeneratedOutfit {
        let started = Instant::now();
        let outfit = self.generator.generate(&request);
        self.record(&request, &outfit, started);
        self.save(&outfit).await;
        outfit
    }

    /// Generate for a stored user: the wardrobe and history come from the store
    pub async fn generate_for_user(&self, user_id: &str, mut request: GenerationRequest) -> GeneratedOutfit {
        let started = Instant::now();
        let config = self.store_config().clone();
        request.user_profile.user_id = Some(user_id.to_string());

        match with_retry(&config, "wardrobe", || self.store.wardrobe(user_id)).await {
            Ok(items) => request.wardrobe = items,
            Err(err) => {
                let mut outfit = GeneratedOutfit::failed(
                    request.occasion.clone(),
                    vec![WardrobeError::from(err).to_string()],
                    Utc::now(),
                );
                outfit.user_id = Some(user_id.to_string());
                self.record(&request, &outfit, started);
                return outfit;
            }
        }

        match with_retry(&config, "history", || self.store.history(user_id)).await {
            Ok(history) => request.outfit_history.extend(history),
            Err(err) => tracing::warn!(user_id, error = %err, "history unavailable, continuing without it"),
        }

        let outfit = self.generator.generate(&request);
        self.record(&request, &outfit, started);
        self.save(&outfit).await;
        outfit
    }

    async fn save(&self, outfit: &GeneratedOutfit) {
        if outfit.user_id.is_none() {
            return;
        }
        let config = self.store_config().clone();
        if let Err(err) = with_retry(&config, "save_outfit", || self.store.save_outfit(outfit)).await {
            tracing::warn!(outfit_id = %outfit.id, error = %err, "outfit not saved");
        }
    }

    fn record(&self, request: &GenerationRequest, outfit: &GeneratedOutfit, started: Instant) {
        let failed_rules = failed_rules(outfit);

        self.metrics.record(&GenerationEvent {
            strategy: STRATEGY.to_string(),
            occasion: outfit.occasion.clone(),
            style: request.style.clone(),
            mood: request.mood.clone(),
            duration_ms: started.elapsed().as_millis() as u64,
            success: outfit.was_successful,
            generation_method: outfit.generation_method,
            failed_rules,
        });
    }
}

/// Rule classes still failing, or the failure kind when no validation ran
fn failed_rules(outfit: &GeneratedOutfit) -> Vec<String> {
    let mut rules: Vec<String> = outfit.metadata.failed_rules.iter().map(ToString::to_string).collect();
    if rules.is_empty() && !outfit.was_successful {
        let tag = outfit
            .validation_errors
            .first()
            .and_then(|error| error.split_once('/'))
            .map(|(tag, _)| tag)
            .filter(|tag| !tag.is_empty() && tag.chars().all(|c| c.is_ascii_uppercase()));
        rules.push(match tag {
            Some(tag) => tag.to_lowercase(),
            None => "low_confidence".to_string(),
        });
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use wardrobe_core::{HealAction, HealingLog, RuleClass, Weather};
    use wardrobe_rules::RuleTables;

    use crate::config::PipelineConfig;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<GenerationEvent>>,
    }

    impl MetricsSink for RecordingSink {
        fn record(&self, event: &GenerationEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    /// Fails the first `failures` calls of every operation
    struct FlakyStore {
        inner: InMemoryStore,
        failures: usize,
        wardrobe_calls: AtomicUsize,
        history_calls: AtomicUsize,
        history_down: bool,
    }

    #[async_trait]
    impl WardrobeStore for FlakyStore {
        async fn wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>, StoreError> {
            if self.wardrobe_calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(StoreError::Unavailable("connection reset".into()));
            }
            self.inner.wardrobe(user_id).await
        }

        async fn history(&self, user_id: &str) -> Result<Vec<OutfitHistoryEntry>, StoreError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            if self.history_down {
                return Err(StoreError::Unavailable("history offline".into()));
            }
            self.inner.history(user_id).await
        }

        async fn save_outfit(&self, outfit: &GeneratedOutfit) -> Result<(), StoreError> {
            self.inner.save_outfit(outfit).await
        }
    }

    fn casual_wardrobe() -> Vec<WardrobeItem> {
        vec![
            WardrobeItem::new("tee", "t-shirt", "White Tee").with_color("white"),
            WardrobeItem::new("jeans", "jeans", "Blue Jeans").with_color("denim"),
            WardrobeItem::new("sneakers", "sneakers", "White Sneakers").with_color("white"),
        ]
    }

    fn fast_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.store.backoff_ms = 1;
        config.store.timeout_ms = 200;
        config
    }

    fn service<S: WardrobeStore>(store: Arc<S>, sink: Arc<RecordingSink>) -> OutfitService<S> {
        let generator = OutfitGenerator::new(RuleTables::shared(), fast_config()).unwrap();
        OutfitService::new(Arc::new(generator), store, sink)
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("casual", Weather::new(72.0, "clear"), vec![]).with_seed(11)
    }

    #[tokio::test]
    async fn test_generate_for_user_saves_once_and_records() {
        let store = Arc::new(InMemoryStore::new());
        store.put_wardrobe("u1", casual_wardrobe()).await;
        let sink = Arc::new(RecordingSink::default());

        let outfit = service(store.clone(), sink.clone()).generate_for_user("u1", request()).await;

        assert!(outfit.was_successful, "{:?}", outfit.validation_errors);
        assert_eq!(outfit.user_id.as_deref(), Some("u1"));
        assert_eq!(store.outfits().await.len(), 1);
        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].strategy, STRATEGY);
        assert!(events[0].success);
    }

    #[tokio::test]
    async fn test_unknown_user_fails_without_saving() {
        let store = Arc::new(InMemoryStore::new());
        let sink = Arc::new(RecordingSink::default());

        let outfit = service(store.clone(), sink.clone()).generate_for_user("ghost", request()).await;

        assert!(!outfit.was_successful);
        assert!(outfit.validation_errors[0].starts_with("STORE/"));
        assert!(store.outfits().await.is_empty());
        assert!(!sink.events.lock().unwrap()[0].success);
    }

    #[tokio::test]
    async fn test_transient_wardrobe_failures_are_retried() {
        let inner = InMemoryStore::new();
        inner.put_wardrobe("u1", casual_wardrobe()).await;
        let store = Arc::new(FlakyStore {
            inner,
            failures: 2,
            wardrobe_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            history_down: false,
        });

        let outfit = service(store.clone(), Arc::new(RecordingSink::default()))
            .generate_for_user("u1", request())
            .await;

        assert!(outfit.was_successful);
        assert_eq!(store.wardrobe_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_history_failure_degrades_to_empty_history() {
        let inner = InMemoryStore::new();
        inner.put_wardrobe("u1", casual_wardrobe()).await;
        let store = Arc::new(FlakyStore {
            inner,
            failures: 0,
            wardrobe_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            history_down: true,
        });

        let outfit = service(store.clone(), Arc::new(RecordingSink::default()))
            .generate_for_user("u1", request())
            .await;

        assert!(outfit.was_successful);
        // one call plus the configured retries
        assert_eq!(store.history_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_configured_attempts() {
        let config = StoreConfig {
            timeout_ms: 50,
            retries: 1,
            backoff_ms: 1,
        };
        let calls = AtomicUsize::new(0);
        let result: Result<(), StoreError> = with_retry(&config, "probe", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(StoreError::Unavailable("down".into())) }
        })
        .await;

        assert_eq!(result, Err(StoreError::Unavailable("down".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let config = StoreConfig {
            timeout_ms: 10,
            retries: 0,
            backoff_ms: 1,
        };
        let result: Result<(), StoreError> = with_retry(&config, "slow", || async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err(StoreError::Timeout(10)));
    }

    #[test]
    fn test_failed_rules_ignore_healed_classes() {
        let mut log = HealingLog::new(2);
        log.record(
            1,
            RuleClass::OccasionForbidden,
            HealAction::Substituted {
                from: "sneakers".into(),
                to: "loafers".into(),
            },
            "sneakers replaced by loafers",
        );
        let mut outfit = GeneratedOutfit::failed("business", vec!["missing required shoes".into()], Utc::now());
        outfit.metadata.healing_log = Some(log);
        outfit.metadata.failed_rules = vec![RuleClass::MissingCategory];

        assert_eq!(failed_rules(&outfit), vec!["missing_category".to_string()]);
    }

    #[tokio::test]
    async fn test_failures_without_validation_are_tagged() {
        let sink = Arc::new(RecordingSink::default());
        let svc = service(Arc::new(InMemoryStore::new()), sink.clone());
        svc.generate(request()).await;

        let events = sink.events.lock().unwrap();
        assert!(!events[0].success);
        assert_eq!(events[0].failed_rules, vec!["input".to_string()]);
    }

    #[tokio::test]
    async fn test_low_confidence_is_reported() {
        let mut config = fast_config();
        config.min_confidence = 100.0;
        let generator = OutfitGenerator::new(RuleTables::shared(), config).unwrap();
        let sink = Arc::new(RecordingSink::default());
        let svc = OutfitService::new(Arc::new(generator), Arc::new(InMemoryStore::new()), sink.clone());

        let mut req = request();
        req.wardrobe = casual_wardrobe();
        let outfit = svc.generate(req).await;

        assert!(!outfit.was_successful);
        assert!(outfit.metadata.failed_rules.is_empty());
        assert_eq!(sink.events.lock().unwrap()[0].failed_rules, vec!["low_confidence".to_string()]);
    }
}
