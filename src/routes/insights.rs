use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Period, SummaryStat};
use crate::services::insight_service::generate_market_insight;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_insight))
}

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub summary: Vec<SummaryStat>,
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight: String,
}

/// POST /api/insights
/// Narrative summary of a performance table. Provider failures come back
/// as a placeholder message, never as an error status.
async fn create_insight(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Json<InsightResponse> {
    info!("POST /api/insights - {} instruments, period {}", request.summary.len(), request.period.code());

    let insight = generate_market_insight(&state.llm_service, &request.summary, request.period).await;

    Json(InsightResponse { insight })
}
