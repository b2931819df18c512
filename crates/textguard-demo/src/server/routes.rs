use crate::models::{ClassificationRecord, ClassifyRequest, ClassifyResponse, EXAMPLE_MESSAGES};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use textguard_core::Error;
use textguard_model::SpamClassifier;

// ============================================================================
// Health and status endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn model_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "loaded": state.provisioner.is_loaded().await,
        "source": state.provisioner.source().describe(),
    }))
}

pub async fn examples() -> impl IntoResponse {
    Json(serde_json::json!({ "examples": EXAMPLE_MESSAGES }))
}

// ============================================================================
// Classification endpoints
// ============================================================================

pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Response {
    // Memoized: only the first call pays for acquisition.
    let model = match state.provisioner.get().await {
        Ok(model) => model,
        Err(err) => return error_response(&err),
    };

    let classifier = SpamClassifier::new(model);
    let model_name = classifier.model_name().to_string();

    match classifier.classify(&req.text).await {
        Ok(Some(result)) => {
            state.add_record(ClassificationRecord::new(&req.text, result));
            Json(ClassifyResponse {
                result: Some(result),
                model: model_name,
            })
            .into_response()
        }
        // Empty input: a defined no-op, not an error.
        Ok(None) => Json(ClassifyResponse {
            result: None,
            model: model_name,
        })
        .into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let records = state.recent_records(query.limit.unwrap_or(20));
    Json(serde_json::json!({ "records": records }))
}

/// Surface the specific failure kind to the client; the UI disables
/// classification and shows it rather than pretending "no model" is fine.
fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::Download(_) => StatusCode::BAD_GATEWAY,
        Error::Extraction(_) | Error::ModelLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(serde_json::json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            }
        })),
    )
        .into_response()
}
