//! API Handlers
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use wardrobe_core::{GeneratedOutfit, GenerationRequest, WardrobeItem, ENGINE_VERSION};

use crate::AppState;

pub async fn generate(State(state): State<AppState>, Json(request): Json<GenerationRequest>) -> Json<GeneratedOutfit> {
    Json(state.service.generate(request).await)
}

/// Generate from the wardrobe and history stored for `user_id`
pub async fn generate_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<GenerationRequest>,
) -> Json<GeneratedOutfit> {
    Json(state.service.generate_for_user(&user_id, request).await)
}

pub async fn put_wardrobe(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(items): Json<Vec<WardrobeItem>>,
) -> (StatusCode, Json<Value>) {
    let count = items.len();
    state.service.store().put_wardrobe(user_id.clone(), items).await;
    (StatusCode::OK, Json(json!({ "user_id": user_id, "items": count })))
}

pub async fn validate(State(state): State<AppState>, Json(request): Json<GenerationRequest>) -> Response {
    match state.service.generator().validate_items(&request) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() }))).into_response(),
    }
}

pub async fn list_occasions(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let tables = state.service.generator().tables();
    let occasions: Vec<Value> = tables
        .occasions
        .iter()
        .map(|rule| {
            json!({
                "key": rule.key,
                "aliases": rule.aliases,
                "category": rule.category,
                "formality": rule.formality,
            })
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "version": tables.version, "occasions": occasions })),
    )
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": ENGINE_VERSION,
            "rules": state.service.generator().tables().version,
            "pipeline": state.service.generator().pipeline_id(),
        })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "metrics encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
