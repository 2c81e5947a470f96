use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::{resolve_instruments, DashboardAction, DashboardState};
use crate::services::dashboard_reducer::reduce;
use crate::services::insight_service::generate_market_insight;
use crate::services::llm_service::LlmService;
use crate::services::market_data_service::MarketDataService;

/// Server-side dashboard: owns the current state and sequences the data and
/// insight calls. All state changes go through `reduce`.
#[derive(Clone)]
pub struct DashboardSession {
    state: Arc<RwLock<DashboardState>>,
    market_data: MarketDataService,
    llm_service: Arc<LlmService>,
}

impl DashboardSession {
    pub fn new(market_data: MarketDataService, llm_service: Arc<LlmService>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DashboardState::default())),
            market_data,
            llm_service,
        }
    }

    pub async fn current(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    async fn apply(&self, action: DashboardAction) -> DashboardState {
        let mut state = self.state.write().await;
        *state = reduce(&state, action);
        state.clone()
    }

    /// Apply a user action. When it changes what should be displayed, a
    /// refresh is started in the background.
    pub async fn dispatch(&self, action: DashboardAction) -> DashboardState {
        let (changed, next) = {
            let mut state = self.state.write().await;
            let before = state.query();
            *state = reduce(&state, action);
            (before != state.query(), state.clone())
        };

        if changed {
            let session = self.clone();
            tokio::spawn(async move {
                if let Some(insight_task) = session.refresh().await {
                    let _ = insight_task.await;
                }
            });
        }

        next
    }

    /// Load data for the current query. Returns the handle of the insight
    /// task once the data has been applied, or `None` when the response was
    /// stale or the load failed.
    pub async fn refresh(&self) -> Option<JoinHandle<()>> {
        let (request_id, query) = {
            let mut state = self.state.write().await;
            // ids are issued under the lock so they reach the reducer in order
            let request_id = state.latest_request + 1;
            *state = reduce(&state, DashboardAction::LoadStarted { request_id });
            (request_id, state.query())
        };

        info!(
            "Dashboard request {}: {} instruments, period {}, interval {}",
            request_id,
            query.selected.len(),
            query.period.code(),
            query.interval.code()
        );

        let instruments = match resolve_instruments(&query.selected) {
            Ok(instruments) if !instruments.is_empty() => instruments,
            Ok(_) => {
                warn!("Dashboard request {} has no instruments selected", request_id);
                self.apply(DashboardAction::DataFailed { request_id }).await;
                return None;
            }
            Err(symbol) => {
                warn!("Dashboard request {} references unknown symbol {}", request_id, symbol);
                self.apply(DashboardAction::DataFailed { request_id }).await;
                return None;
            }
        };

        let snapshot = self
            .market_data
            .fetch_market_data(&instruments, query.period, query.interval)
            .await;
        let summary = snapshot.summary.clone();

        let state = self
            .apply(DashboardAction::DataLoaded { request_id, snapshot })
            .await;
        if state.latest_request != request_id {
            return None;
        }

        let session = self.clone();
        Some(tokio::spawn(async move {
            let insight = generate_market_insight(&session.llm_service, &summary, query.period).await;
            session
                .apply(DashboardAction::InsightLoaded { request_id, insight })
                .await;
        }))
    }
}
