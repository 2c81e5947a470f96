use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::models::{Instrument, Interval, MarketSnapshot, Period};
use crate::services::market_simulator;

/// Serves simulated market data the way a remote quote backend would,
/// including an artificial response delay.
#[derive(Debug, Clone)]
pub struct MarketDataService {
    latency: Duration,
}

impl MarketDataService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub async fn fetch_market_data(
        &self,
        instruments: &[Instrument],
        period: Period,
        interval: Interval,
    ) -> MarketSnapshot {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.generate_now(instruments, period, interval, Local::now().date_naive())
    }

    fn generate_now(
        &self,
        instruments: &[Instrument],
        period: Period,
        interval: Interval,
        today: NaiveDate,
    ) -> MarketSnapshot {
        // thread rng is !Send, keep it out of the async body
        let mut rng = rand::rng();
        let snapshot = market_simulator::generate(instruments, period, interval, today, &mut rng);

        info!(
            "Simulated {} points for {} instruments (period: {}, interval: {})",
            snapshot.data.len(),
            instruments.len(),
            period.code(),
            interval.code()
        );

        snapshot
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}
