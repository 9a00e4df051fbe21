//! Wardrobe API /v1: REST endpoints
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use wardrobe_pipeline::{InMemoryStore, OutfitGenerator, OutfitService};

pub use metrics::PrometheusSink;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: OutfitService<InMemoryStore>,
    pub metrics: Arc<PrometheusSink>,
}

impl AppState {
    pub fn new(generator: OutfitGenerator) -> anyhow::Result<Self> {
        let metrics = Arc::new(PrometheusSink::new()?);
        let service = OutfitService::new(Arc::new(generator), Arc::new(InMemoryStore::new()), metrics.clone());
        Ok(Self { service, metrics })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/outfits/generate", post(handlers::generate))
        .route("/v1/outfits/validate", post(handlers::validate))
        .route("/v1/users/{user_id}/wardrobe", put(handlers::put_wardrobe))
        .route("/v1/users/{user_id}/outfits", post(handlers::generate_for_user))
        .route("/v1/rules/occasions", get(handlers::list_occasions))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Wardrobe API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use wardrobe_core::{GenerationRequest, WardrobeItem, Weather};
    use wardrobe_pipeline::PipelineConfig;
    use wardrobe_rules::RuleTables;

    fn state() -> AppState {
        let generator = OutfitGenerator::new(RuleTables::shared(), PipelineConfig::default()).unwrap();
        AppState::new(generator).unwrap()
    }

    fn wardrobe() -> Vec<WardrobeItem> {
        vec![
            WardrobeItem::new("tee", "t-shirt", "White Tee").with_color("white"),
            WardrobeItem::new("jeans", "jeans", "Blue Jeans").with_color("denim"),
            WardrobeItem::new("sneakers", "sneakers", "White Sneakers").with_color("white"),
        ]
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Vec<u8>>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(bytes) => builder.header("content-type", "application/json").body(Body::from(bytes)),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(create_app(state()), Method::GET, "/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_returns_outfit() {
        let request = GenerationRequest::new("casual", Weather::new(72.0, "clear"), wardrobe()).with_seed(4);
        let (status, body) = send(
            create_app(state()),
            Method::POST,
            "/v1/outfits/generate",
            Some(serde_json::to_vec(&request).unwrap()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let outfit = json(&body);
        assert_eq!(outfit["wasSuccessful"], true);
        assert_eq!(outfit["items"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_validate_rejects_duplicate_ids() {
        let mut items = wardrobe();
        items.push(WardrobeItem::new("tee", "t-shirt", "Gray Tee"));
        let request = GenerationRequest::new("casual", Weather::new(72.0, "clear"), items);
        let (status, body) = send(
            create_app(state()),
            Method::POST,
            "/v1/outfits/validate",
            Some(serde_json::to_vec(&request).unwrap()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json(&body)["error"].as_str().unwrap().starts_with("INPUT/"));
    }

    #[tokio::test]
    async fn test_validate_reports_errors() {
        let request = GenerationRequest::new("business", Weather::new(50.0, "clear"), wardrobe());
        let (status, body) = send(
            create_app(state()),
            Method::POST,
            "/v1/outfits/validate",
            Some(serde_json::to_vec(&request).unwrap()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = json(&body);
        assert_eq!(result["is_valid"], false);
        assert!(!result["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lists_occasions() {
        let (status, body) = send(create_app(state()), Method::GET, "/v1/rules/occasions", None).await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<String> = json(&body)["occasions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["key"].as_str().unwrap().to_string())
            .collect();
        assert!(keys.iter().any(|k| k == "business"));
        assert!(keys.iter().any(|k| k == "default"));
    }

    #[tokio::test]
    async fn test_stored_wardrobe_generation_and_metrics() {
        let state = state();
        let (status, _) = send(
            create_app(state.clone()),
            Method::PUT,
            "/v1/users/u1/wardrobe",
            Some(serde_json::to_vec(&wardrobe()).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let request = GenerationRequest::new("casual", Weather::new(70.0, "clear"), Vec::new()).with_seed(2);
        let (status, body) = send(
            create_app(state.clone()),
            Method::POST,
            "/v1/users/u1/outfits",
            Some(serde_json::to_vec(&request).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let outfit = json(&body);
        assert_eq!(outfit["user_id"], "u1");
        assert_eq!(outfit["wasSuccessful"], true);
        assert_eq!(state.service.store().outfits().await.len(), 1);

        let (status, body) = send(create_app(state), Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("outfit_generations_total"));
        assert!(text.contains("occasion=\"casual\""));
    }
}
