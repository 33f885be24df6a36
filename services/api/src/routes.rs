use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use home_intake::error::AppError;
use home_intake::workflows::assessment::{
    assessment_router, AnswerRecordImporter, AssessmentRepository, CaseworkerQueue,
    IntakeService, ScoreResult, ScoringEngine,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchScoreRequest {
    pub(crate) csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchScoreResponse {
    pub(crate) today: NaiveDate,
    pub(crate) scored: usize,
    pub(crate) results: Vec<BatchScoreEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchScoreEntry {
    pub(crate) row: usize,
    pub(crate) result: ScoreResult,
}

pub(crate) fn with_assessment_routes<R, Q>(service: Arc<IntakeService<R, Q>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessments/batch",
            axum::routing::post(batch_score_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores a pasted paper-intake export without storing any of it.
pub(crate) async fn batch_score_endpoint(
    Json(payload): Json<BatchScoreRequest>,
) -> Result<Json<BatchScoreResponse>, AppError> {
    let BatchScoreRequest { csv, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let engine = ScoringEngine::new(today);

    let imported = AnswerRecordImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let results: Vec<_> = imported
        .into_iter()
        .map(|row| BatchScoreEntry {
            row: row.row,
            result: engine.score(&row.answers),
        })
        .collect();

    Ok(Json(BatchScoreResponse {
        today,
        scored: results.len(),
        results,
    }))
}
