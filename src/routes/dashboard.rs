use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::models::{DashboardState, UserAction};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/actions", post(post_action))
        .route("/refresh", post(refresh_dashboard))
}

/// GET /api/dashboard
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.dashboard.current().await)
}

/// POST /api/dashboard/actions
/// Applies a selection change; data reloads in the background when needed.
async fn post_action(
    State(state): State<AppState>,
    Json(action): Json<UserAction>,
) -> Json<DashboardState> {
    info!("POST /api/dashboard/actions - {:?}", action);
    Json(state.dashboard.dispatch(action.into()).await)
}

/// POST /api/dashboard/refresh
/// Reloads data for the current selection and returns once it is applied.
/// The insight arrives later.
async fn refresh_dashboard(State(state): State<AppState>) -> Json<DashboardState> {
    info!("POST /api/dashboard/refresh");
    state.dashboard.refresh().await;
    Json(state.dashboard.current().await)
}
