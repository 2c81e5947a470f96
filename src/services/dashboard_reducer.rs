use tracing::debug;

use crate::models::{find_instrument, DashboardAction, DashboardState};

/// Apply one action to the dashboard state, returning the next state.
pub fn reduce(state: &DashboardState, action: DashboardAction) -> DashboardState {
    match action {
        DashboardAction::ToggleInstrument(symbol) => toggle_instrument(state, &symbol),
        DashboardAction::SetPeriod(period) => DashboardState {
            period,
            ..state.clone()
        },
        DashboardAction::SetInterval(interval) => DashboardState {
            interval,
            ..state.clone()
        },
        DashboardAction::LoadStarted { request_id } => DashboardState {
            loading: true,
            insight: None,
            latest_request: request_id,
            ..state.clone()
        },
        DashboardAction::DataLoaded { request_id, snapshot } => {
            if is_stale(state, request_id) {
                return state.clone();
            }
            DashboardState {
                data: snapshot.data,
                summary: snapshot.summary,
                loading: false,
                ..state.clone()
            }
        }
        DashboardAction::DataFailed { request_id } => {
            if is_stale(state, request_id) {
                return state.clone();
            }
            DashboardState {
                loading: false,
                ..state.clone()
            }
        }
        DashboardAction::InsightLoaded { request_id, insight } => {
            if is_stale(state, request_id) {
                return state.clone();
            }
            DashboardState {
                insight: Some(insight),
                ..state.clone()
            }
        }
    }
}

fn toggle_instrument(state: &DashboardState, symbol: &str) -> DashboardState {
    let mut selected = state.selected.clone();

    if let Some(pos) = selected.iter().position(|s| s == symbol) {
        // the chart needs at least one series
        if selected.len() == 1 {
            return state.clone();
        }
        selected.remove(pos);
    } else if find_instrument(symbol).is_some() {
        selected.push(symbol.to_string());
    } else {
        debug!("Ignoring toggle for unknown symbol {}", symbol);
        return state.clone();
    }

    DashboardState {
        selected,
        ..state.clone()
    }
}

fn is_stale(state: &DashboardState, request_id: u64) -> bool {
    if request_id != state.latest_request {
        debug!(
            "Discarding stale response for request {} (latest is {})",
            request_id, state.latest_request
        );
        return true;
    }
    false
}
