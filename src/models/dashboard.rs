use serde::{Deserialize, Serialize};

use crate::models::{Interval, MarketDataPoint, MarketSnapshot, Period, SummaryStat, DEFAULT_SELECTION};

/// Complete dashboard view state. Transitions go through
/// `services::dashboard_reducer::reduce`; nothing mutates it in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub selected: Vec<String>,
    pub period: Period,
    pub interval: Interval,
    pub data: Vec<MarketDataPoint>,
    pub summary: Vec<SummaryStat>,
    pub loading: bool,
    pub insight: Option<String>,
    /// Id of the most recently issued data request; responses carrying any
    /// other id are stale.
    pub latest_request: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            selected: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
            period: Period::default(),
            interval: Interval::default(),
            data: Vec::new(),
            summary: Vec::new(),
            loading: true,
            insight: None,
            latest_request: 0,
        }
    }
}

/// The inputs that determine which data the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub selected: Vec<String>,
    pub period: Period,
    pub interval: Interval,
}

impl DashboardState {
    pub fn query(&self) -> DashboardQuery {
        DashboardQuery {
            selected: self.selected.clone(),
            period: self.period,
            interval: self.interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    ToggleInstrument(String),
    SetPeriod(Period),
    SetInterval(Interval),
    LoadStarted { request_id: u64 },
    DataLoaded { request_id: u64, snapshot: MarketSnapshot },
    DataFailed { request_id: u64 },
    InsightLoaded { request_id: u64, insight: String },
}

/// Actions a client may send over HTTP. Load lifecycle actions are internal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    ToggleInstrument { symbol: String },
    SetPeriod { period: Period },
    SetInterval { interval: Interval },
}

impl From<UserAction> for DashboardAction {
    fn from(action: UserAction) -> Self {
        match action {
            UserAction::ToggleInstrument { symbol } => DashboardAction::ToggleInstrument(symbol),
            UserAction::SetPeriod { period } => DashboardAction::SetPeriod(period),
            UserAction::SetInterval { interval } => DashboardAction::SetInterval(interval),
        }
    }
}
