//! HTTP handlers for the answer API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::api::{AnswerRequest, AnswerResponse, HealthResponse};
use super::state::AppState;
use crate::ai::format_answer_prompt;

/// POST /api/answer - answer a presales question.
///
/// The single error collapse point: body rejections, serialization failures,
/// and provider errors are all logged here and surfaced to the caller as the
/// one generic failure message with a server-error status.
pub async fn post_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> (StatusCode, Json<AnswerResponse>) {
    let request_id = Uuid::new_v4();

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(%request_id, error = %rejection, "Rejected malformed answer request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnswerResponse::failure()),
            );
        }
    };

    let context = state.knowledge.reduce(&request.question);
    tracing::debug!(
        %request_id,
        packages = context.packages.len(),
        faq = context.faq.len(),
        "Reduced knowledge base for question"
    );

    let context_json = match serde_json::to_string(&context) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(%request_id, error = %e, "Failed to serialize reduced context");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnswerResponse::failure()),
            );
        }
    };

    let prompt = format_answer_prompt(&request.question, &context_json);
    match state
        .client
        .generate(&state.system_instruction, &prompt)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(AnswerResponse::new(text))),
        Err(e) => {
            tracing::error!(%request_id, error = %e, "Answer generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnswerResponse::failure()),
            )
        }
    }
}

/// GET /api/health - liveness probe.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}
