//! API route handlers.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use tracing::debug;

use verselight_cache::CacheStats;
use verselight_core::types::{
    ContextResponse, CrossRefResponse, ExplainResponse, TranslateResponse, ValidatedVerse,
    VideoResponse,
};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;
type Payload<T> = std::result::Result<Json<T>, JsonRejection>;

/// POST /api/validate-verse
pub async fn validate_verse(
    State(state): State<Arc<AppState>>,
    payload: Payload<ValidateVerseRequest>,
) -> Result<Json<ValidatedVerse>> {
    let Json(req) = payload.map_err(|e| ApiError::from(e).invalid())?;

    let verse = state
        .enricher
        .validate_verse(field(&req.input))
        .await
        .map_err(|e| ApiError::from(e).invalid())?;

    Ok(Json(verse))
}

/// POST /api/explain
pub async fn explain(
    State(state): State<Arc<AppState>>,
    payload: Payload<VerseRequest>,
) -> Result<Json<ExplainResponse>> {
    let Json(req) = payload?;

    let response = state
        .enricher
        .explain(field(&req.reference), field(&req.verse_text))
        .await
        .map_err(|e| ApiError::for_feature("explanation", e))?;

    Ok(Json(response))
}

/// POST /api/context
pub async fn context(
    State(state): State<Arc<AppState>>,
    payload: Payload<VerseRequest>,
) -> Result<Json<ContextResponse>> {
    let Json(req) = payload?;

    let response = state
        .enricher
        .context(field(&req.reference), field(&req.verse_text))
        .await
        .map_err(|e| ApiError::for_feature("context", e))?;

    Ok(Json(response))
}

/// POST /api/crossref
pub async fn crossref(
    State(state): State<Arc<AppState>>,
    payload: Payload<VerseRequest>,
) -> Result<Json<CrossRefResponse>> {
    let Json(req) = payload?;

    let response = state
        .enricher
        .crossref(field(&req.reference), field(&req.verse_text))
        .await
        .map_err(|e| ApiError::for_feature("cross-reference", e))?;

    Ok(Json(response))
}

/// POST /api/translate
pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Payload<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    let Json(req) = payload?;

    let response = state
        .enricher
        .translate(
            field(&req.reference),
            field(&req.verse_text),
            field(&req.testament),
        )
        .await
        .map_err(|e| ApiError::for_feature("translation", e))?;

    Ok(Json(response))
}

/// POST /api/youtube
pub async fn youtube(
    State(state): State<Arc<AppState>>,
    payload: Payload<VideoRequest>,
) -> Result<Json<VideoResponse>> {
    let Json(req) = payload?;

    let response = state
        .enricher
        .videos(field(&req.reference))
        .await
        .map_err(|e| ApiError::for_feature("videos", e))?;

    Ok(Json(response))
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}

/// GET /api/cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    let stats = state.cache().stats();
    debug!(count = stats.count, "Cache stats requested");
    Json(stats)
}
