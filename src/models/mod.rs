mod dashboard;
mod horizon;
mod instrument;
mod market_data;

pub use dashboard::{DashboardAction, DashboardQuery, DashboardState, UserAction};
pub use horizon::{Interval, IntervalInfo, Period, PeriodInfo};
pub use instrument::{
    find_instrument, resolve_instruments, Instrument, InstrumentCategory, DEFAULT_SELECTION,
    INSTRUMENTS,
};
pub use market_data::{MarketDataPoint, MarketSnapshot, SummaryStat};
