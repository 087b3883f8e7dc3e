//! Axum route handlers for the scoring API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::scoring::taxonomy::TaxonomyCatalog;
use crate::scoring::{GeneralScoreResult, MatchResult, ScoreOptions};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    #[serde(flatten)]
    pub options: ScoreOptions,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub jd_text: String,
    #[serde(flatten)]
    pub options: ScoreOptions,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Standalone ATS score for a resume. Empty text is accepted and scores near the floor.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<GeneralScoreResult>, AppError> {
    let engine = state.engine.clone();

    // CPU-bound: spawn_blocking to avoid blocking the async executor.
    let result = tokio::task::spawn_blocking(move || {
        engine.compute_general_ats(&request.text, &request.options)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in scoring: {e}")))?;

    Ok(Json(result))
}

/// POST /api/v1/ats/match
///
/// Scores a resume against a job description.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || {
        engine.compute_match_ats(&request.resume_text, &request.jd_text, &request.options)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in matching: {e}")))?;

    Ok(Json(result))
}

/// GET /api/v1/ats/taxonomy
///
/// The hard skills the engine recognises, by category.
pub async fn handle_taxonomy(State(state): State<AppState>) -> Json<TaxonomyCatalog> {
    Json(state.engine.taxonomy().catalog())
}
