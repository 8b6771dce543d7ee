use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, error};

use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub sql: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
    pub row_count: usize,
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: i64,
    pub llm_ready: bool,
    pub startup_error: Option<String>,
}

/// Pipeline failures are part of the response body, not the status code;
/// only a blank question is a client error.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    debug!("API question: {}", payload.question);

    if payload.question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Question must not be empty".to_string()));
    }

    let report = state.pipeline.lock().await.run(&payload.question).await;

    let (result, error) = match report.outcome {
        Ok(result) => (result, None),
        Err(e) => (
            Default::default(),
            Some(ApiError {
                kind: e.kind().to_string(),
                message: e.to_string(),
            }),
        ),
    };

    Ok(Json(AskResponse {
        question: report.question,
        sql: report.sql,
        row_count: result.row_count(),
        columns: result.columns,
        rows: result.rows,
        error,
    }))
}

pub async fn list_tables(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let pipeline = state.pipeline.lock().await;
    pipeline.guard().list_tables().await.map(Json).map_err(|e| {
        error!("Failed to list tables: {}", e);
        (StatusCode::BAD_GATEWAY, format!("Failed to list tables: {}", e))
    })
}

pub async fn system_status(State(state): State<Arc<AppState>>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (chrono::Utc::now() - state.startup_time).num_seconds(),
        llm_ready: state.startup_error.is_none(),
        startup_error: state.startup_error.clone(),
    })
}
