use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One sampled date with the relative performance (percent from period start)
/// of every requested instrument, keyed by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataPoint {
    pub timestamp: String,
    pub values: BTreeMap<String, f64>,
}

impl MarketDataPoint {
    pub fn value(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }
}

/// Per-instrument row for the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStat {
    pub symbol: String,
    pub name: String,
    pub last_price: f64,
    pub percent_change: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub data: Vec<MarketDataPoint>,
    pub summary: Vec<SummaryStat>,
}
