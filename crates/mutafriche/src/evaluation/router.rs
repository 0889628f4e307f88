use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::EvaluationId;
use super::repository::{EvaluationRepository, RepositoryError};
use super::service::{EvaluationRequest, MutabilityService, ServiceError};

/// Router builder exposing evaluation and retrieval endpoints.
pub fn evaluation_router<R>(service: Arc<MutabilityService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_handler::<R>))
        .route(
            "/api/v1/evaluations/:evaluation_id",
            get(fetch_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<MutabilityService<R>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.evaluate(request).await {
        Ok(report) => (StatusCode::OK, axum::Json(report.view())).into_response(),
        Err(ServiceError::Evaluation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ServiceError::Cache(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<MutabilityService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service.get(&id).await {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "evaluation_id": id.0,
                "error": "evaluation not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
