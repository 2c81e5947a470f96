use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstrumentCategory {
    Index,
    Sector,
}

/// A tradable index or sector ETF tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instrument {
    pub symbol: &'static str,
    pub name: &'static str,
    pub category: InstrumentCategory,
    pub color: &'static str,
}

impl Instrument {
    /// Broad indices are quoted with a leading `^`.
    pub fn is_index(&self) -> bool {
        self.symbol.starts_with('^')
    }
}

pub const INSTRUMENTS: &[Instrument] = &[
    // Indices
    Instrument { symbol: "^GSPC", name: "S&P 500", category: InstrumentCategory::Index, color: "#3b82f6" },
    Instrument { symbol: "^NDX", name: "Nasdaq 100", category: InstrumentCategory::Index, color: "#8b5cf6" },
    Instrument { symbol: "^DJI", name: "Dow Jones", category: InstrumentCategory::Index, color: "#ef4444" },
    // Sectors
    Instrument { symbol: "XLK", name: "Technology", category: InstrumentCategory::Sector, color: "#10b981" },
    Instrument { symbol: "XLF", name: "Financial", category: InstrumentCategory::Sector, color: "#f59e0b" },
    Instrument { symbol: "XLV", name: "Health Care", category: InstrumentCategory::Sector, color: "#06b6d4" },
    Instrument { symbol: "XLE", name: "Energy", category: InstrumentCategory::Sector, color: "#f97316" },
    Instrument { symbol: "XLI", name: "Industrials", category: InstrumentCategory::Sector, color: "#64748b" },
    Instrument { symbol: "XLY", name: "Consumer Disc", category: InstrumentCategory::Sector, color: "#ec4899" },
    Instrument { symbol: "XLP", name: "Consumer Staples", category: InstrumentCategory::Sector, color: "#a855f7" },
    Instrument { symbol: "XLB", name: "Materials", category: InstrumentCategory::Sector, color: "#84cc16" },
    Instrument { symbol: "XLU", name: "Utilities", category: InstrumentCategory::Sector, color: "#eab308" },
    Instrument { symbol: "XLC", name: "Communication", category: InstrumentCategory::Sector, color: "#6366f1" },
    Instrument { symbol: "XLRE", name: "Real Estate", category: InstrumentCategory::Sector, color: "#14b8a6" },
];

/// Default dashboard selection on startup.
pub const DEFAULT_SELECTION: &[&str] = &["^GSPC", "^NDX", "XLK", "XLF", "XLE"];

pub fn find_instrument(symbol: &str) -> Option<&'static Instrument> {
    INSTRUMENTS.iter().find(|i| i.symbol == symbol)
}

/// Resolve a list of symbols against the catalog, keeping the caller's order.
/// Returns the first unknown symbol as the error.
pub fn resolve_instruments<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<Instrument>, String> {
    symbols
        .iter()
        .map(|s| {
            find_instrument(s.as_ref())
                .copied()
                .ok_or_else(|| s.as_ref().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_symbols_are_unique() {
        let mut symbols: Vec<&str> = INSTRUMENTS.iter().map(|i| i.symbol).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), INSTRUMENTS.len());
    }

    #[test]
    fn test_index_marker_matches_category() {
        for instrument in INSTRUMENTS {
            assert_eq!(
                instrument.is_index(),
                instrument.category == InstrumentCategory::Index,
                "{} category mismatch",
                instrument.symbol
            );
        }
    }

    #[test]
    fn test_default_selection_is_in_catalog() {
        assert!(resolve_instruments(DEFAULT_SELECTION).is_ok());
    }

    #[test]
    fn test_resolve_reports_unknown_symbol() {
        let result = resolve_instruments(&["XLK", "NOPE"]);
        assert_eq!(result, Err("NOPE".to_string()));
    }
}
