use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{
    resolve_instruments, Instrument, Interval, IntervalInfo, MarketSnapshot, Period, PeriodInfo,
    INSTRUMENTS,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/instruments", get(get_instruments))
        .route("/periods", get(get_periods))
        .route("/intervals", get(get_intervals))
        .route("/data", get(get_market_data))
}

#[derive(Debug, Deserialize)]
pub struct MarketDataQuery {
    /// Comma-separated symbols, e.g. `^GSPC,XLK`
    pub symbols: String,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub interval: Interval,
}

/// GET /api/market/instruments
async fn get_instruments() -> Json<&'static [Instrument]> {
    Json(INSTRUMENTS)
}

/// GET /api/market/periods
async fn get_periods() -> Json<Vec<PeriodInfo>> {
    Json(Period::ALL.into_iter().map(PeriodInfo::from).collect())
}

/// GET /api/market/intervals
async fn get_intervals() -> Json<Vec<IntervalInfo>> {
    Json(Interval::ALL.into_iter().map(IntervalInfo::from).collect())
}

/// GET /api/market/data?symbols=^GSPC,XLK&period=6mo&interval=1d
async fn get_market_data(
    State(state): State<AppState>,
    Query(params): Query<MarketDataQuery>,
) -> Result<Json<MarketSnapshot>, AppError> {
    info!(
        "GET /api/market/data - symbols: {}, period: {}, interval: {}",
        params.symbols,
        params.period.code(),
        params.interval.code()
    );

    let symbols = parse_symbols(&params.symbols);
    if symbols.is_empty() {
        warn!("Rejected market data request with empty selection");
        return Err(AppError::Validation("At least one symbol must be selected".to_string()));
    }

    let instruments = resolve_instruments(&symbols)
        .map_err(|symbol| AppError::Validation(format!("Unknown symbol: {}", symbol)))?;

    let snapshot = state
        .market_data
        .fetch_market_data(&instruments, params.period, params.interval)
        .await;

    Ok(Json(snapshot))
}

/// Split, trim and de-duplicate a comma-separated symbol list, keeping the
/// first occurrence of each symbol.
fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !symbols.iter().any(|s| s == symbol) {
            symbols.push(symbol.to_string());
        }
    }
    symbols
}
