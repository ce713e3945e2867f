//! HTTP API routes.

use crate::agent;
use crate::dataset::Dataset;
use crate::response::{AskRequest, AskResponse};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use titanic_common::logging::generate_trace_id;

/// Application state.
///
/// The dataset is immutable after startup, so a plain `Arc` suffices.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // API surface
        .route("/", get(root))
        .route("/api/v1/ask", post(ask))
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/info", get(dataset_info))
        .with_state(state)
}

// ============ Root ============

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to the Titanic Dataset Chatbot API!",
        "endpoints": {
            "ask": "/api/v1/ask (POST)",
            "health": "/api/v1/health (GET)",
            "info": "/api/v1/info (GET)"
        },
        "description": "Send natural language questions about the Titanic dataset to /api/v1/ask"
    }))
}

// ============ Ask ============

async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse {
    let trace_id = generate_trace_id();
    tracing::info!(%trace_id, query = %request.query, "Processing query");

    let dataset = state.dataset.clone();
    let query = request.query.clone();

    // Chart rendering is CPU-bound; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || agent::answer(&dataset, &query)).await;

    let response = match result {
        Ok(answer) => AskResponse::from_answer(request.query, answer),
        Err(e) => {
            tracing::error!(%trace_id, error = %e, "Query task failed");
            AskResponse::failure(request.query, format!("Error processing your query: {}", e))
        }
    };

    tracing::info!(
        %trace_id,
        success = response.success,
        has_chart = response.visualization.is_some(),
        "Query answered"
    );

    Json(response)
}

// ============ Health Check ============

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "titanic-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============ Dataset Info ============

async fn dataset_info(State(state): State<AppState>) -> impl IntoResponse {
    let dataset = &state.dataset;
    Json(serde_json::json!({
        "total_passengers": dataset.row_count(),
        "columns": dataset.column_names(),
        "numeric_columns": dataset.numeric_column_names(),
        "categorical_columns": dataset.categorical_column_names(),
        "sample_questions": [
            "What percentage of passengers were male on the Titanic?",
            "Show me a histogram of passenger ages",
            "What was the average ticket fare?",
            "How many passengers embarked from each port?"
        ]
    }))
}
