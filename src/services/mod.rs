pub mod dashboard_reducer;
pub mod dashboard_session;
pub mod insight_service;
pub mod llm_service;
pub mod market_data_service;
pub mod market_simulator;
