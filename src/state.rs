use std::sync::Arc;

use crate::services::dashboard_session::DashboardSession;
use crate::services::llm_service::LlmService;
use crate::services::market_data_service::MarketDataService;

#[derive(Clone)]
pub struct AppState {
    pub market_data: MarketDataService,
    pub llm_service: Arc<LlmService>,
    pub dashboard: DashboardSession,
}

impl AppState {
    pub fn new(market_data: MarketDataService, llm_service: Arc<LlmService>) -> Self {
        let dashboard = DashboardSession::new(market_data.clone(), llm_service.clone());
        Self {
            market_data,
            llm_service,
            dashboard,
        }
    }
}
