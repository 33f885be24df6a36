use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerRecord, AssessmentId};
use super::repository::{AssessmentRepository, CaseworkerQueue, RepositoryError};
use super::service::{IntakeService, IntakeServiceError};

const DEFAULT_QUEUE_LIMIT: usize = 25;

/// Router builder exposing intake, scoring and caseworker endpoints.
pub fn assessment_router<R, Q>(service: Arc<IntakeService<R, Q>>) -> Router
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<R, Q>))
        .route("/api/v1/assessments/score", post(score_handler::<R, Q>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(status_handler::<R, Q>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/contact",
            post(contact_handler::<R, Q>),
        )
        .route("/api/v1/caseworker/queue", get(queue_handler::<R, Q>))
        .route(
            "/api/v1/caseworker/queue/summary",
            get(queue_summary_handler::<R, Q>),
        )
        .with_state(service)
}

fn error_response(error: IntakeServiceError) -> Response {
    let status = match &error {
        IntakeServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        IntakeServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        IntakeServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        IntakeServiceError::Queue(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<R, Q>(
    State(service): State<Arc<IntakeService<R, Q>>>,
    axum::Json(answers): axum::Json<AnswerRecord>,
) -> Response
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    match service.submit(answers) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R, Q>(
    State(service): State<Arc<IntakeService<R, Q>>>,
    axum::Json(answers): axum::Json<AnswerRecord>,
) -> Response
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    let result = service.score(&answers);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn status_handler<R, Q>(
    State(service): State<Arc<IntakeService<R, Q>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn contact_handler<R, Q>(
    State(service): State<Arc<IntakeService<R, Q>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    match service.mark_contacted(&AssessmentId(assessment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueParams {
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn queue_handler<R, Q>(
    State(service): State<Arc<IntakeService<R, Q>>>,
    Query(params): Query<QueueParams>,
) -> Response
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_QUEUE_LIMIT);
    match service.pending(limit) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn queue_summary_handler<R, Q>(
    State(service): State<Arc<IntakeService<R, Q>>>,
) -> Response
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    match service.queue_summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}
