//! Synthetic market data.
//!
//! Price paths are random walks run backwards from the current reference
//! price, so the most recent point of every path is exactly the instrument's
//! base price. Relative performance is measured against the first (oldest)
//! point of each path. Rounding to two decimals happens only when points and
//! summaries are assembled, never inside the walk.

use std::collections::BTreeMap;

use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::Rng;

use crate::models::{Instrument, Interval, MarketDataPoint, MarketSnapshot, Period, SummaryStat};

/// Upward drift applied on every step.
pub const TREND: f64 = 0.0005;
pub const INDEX_VOLATILITY: f64 = 0.015;
pub const SECTOR_VOLATILITY: f64 = 0.025;
pub const FALLBACK_BASE_PRICE: f64 = 100.0;

/// Current ("now") reference level per symbol.
const BASE_PRICES: &[(&str, f64)] = &[
    ("^GSPC", 5000.0),
    ("^NDX", 18000.0),
    ("^DJI", 38000.0),
    ("XLK", 200.0),
    ("XLF", 40.0),
    ("XLV", 140.0),
    ("XLE", 90.0),
    ("XLI", 120.0),
    ("XLY", 180.0),
    ("XLP", 75.0),
    ("XLB", 90.0),
    ("XLU", 65.0),
    ("XLC", 75.0),
    ("XLRE", 40.0),
];

const DATE_LABEL_FORMAT: &str = "%b %-d, %y";

pub fn base_price(symbol: &str) -> f64 {
    BASE_PRICES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, price)| *price)
        .unwrap_or(FALLBACK_BASE_PRICE)
}

pub fn volatility_for(instrument: &Instrument) -> f64 {
    if instrument.is_index() {
        INDEX_VOLATILITY
    } else {
        SECTOR_VOLATILITY
    }
}

/// Number of steps between period start and now. The series has one more
/// point than this.
pub fn point_count(period: Period, interval: Interval) -> usize {
    period.days().div_ceil(interval.days()) as usize
}

/// Walk `point_count` steps back from `base` and return the path oldest first.
///
/// `draw` must yield uniform values in `[0, 1)`.
pub fn walk_backwards<F>(base: f64, volatility: f64, point_count: usize, mut draw: F) -> Vec<f64>
where
    F: FnMut() -> f64,
{
    let mut path = Vec::with_capacity(point_count + 1);
    let mut current = base;
    path.push(current);

    for _ in 0..point_count {
        let change = current * (volatility * (draw() - 0.5) + TREND);
        current -= change;
        path.push(current);
    }

    path.reverse();
    path
}

pub fn simulate_price_path<R>(instrument: &Instrument, point_count: usize, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    walk_backwards(
        base_price(instrument.symbol),
        volatility_for(instrument),
        point_count,
        || rng.random::<f64>(),
    )
}

/// Calendar dates of the samples, oldest first; the last one is `today`.
pub fn sample_dates(today: NaiveDate, point_count: usize, step_days: u32) -> Vec<NaiveDate> {
    (0..=point_count)
        .map(|i| {
            let offset = (point_count - i) as i64 * step_days as i64;
            today - ChronoDuration::days(offset)
        })
        .collect()
}

pub fn format_date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Percent change of `price` from `start`, unrounded.
pub fn relative_performance(price: f64, start: f64) -> f64 {
    (price - start) / start * 100.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate chart points and summary rows for `instruments`.
///
/// Callers must reject an empty selection before getting here.
pub fn generate<R>(
    instruments: &[Instrument],
    period: Period,
    interval: Interval,
    today: NaiveDate,
    rng: &mut R,
) -> MarketSnapshot
where
    R: Rng + ?Sized,
{
    let steps = point_count(period, interval);

    let paths: Vec<(&Instrument, Vec<f64>)> = instruments
        .iter()
        .map(|instrument| (instrument, simulate_price_path(instrument, steps, rng)))
        .collect();

    let data = sample_dates(today, steps, interval.days())
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let values: BTreeMap<String, f64> = paths
                .iter()
                .map(|(instrument, path)| {
                    let perf = round2(relative_performance(path[i], path[0]));
                    (instrument.symbol.to_string(), perf)
                })
                .collect();

            MarketDataPoint {
                timestamp: format_date_label(date),
                values,
            }
        })
        .collect();

    let summary = paths
        .iter()
        .map(|(instrument, path)| summarize(instrument, path))
        .collect();

    MarketSnapshot { data, summary }
}

fn summarize(instrument: &Instrument, path: &[f64]) -> SummaryStat {
    let first = path[0];
    let last = path[path.len() - 1];

    SummaryStat {
        symbol: instrument.symbol.to_string(),
        name: instrument.name.to_string(),
        last_price: round2(last),
        percent_change: round2(relative_performance(last, first)),
        color: instrument.color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{find_instrument, InstrumentCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_point_count_rounds_up() {
        assert_eq!(point_count(Period::FiveDays, Interval::Daily), 5);
        assert_eq!(point_count(Period::OneMonth, Interval::Weekly), 5);
        assert_eq!(point_count(Period::OneYear, Interval::Monthly), 13);
        assert_eq!(point_count(Period::OneDay, Interval::Monthly), 1);
    }

    #[test]
    fn test_base_price_fallback() {
        assert_eq!(base_price("^GSPC"), 5000.0);
        assert_eq!(base_price("XLRE"), 40.0);
        assert_eq!(base_price("UNLISTED"), FALLBACK_BASE_PRICE);
    }

    #[test]
    fn test_volatility_by_category() {
        let index = find_instrument("^DJI").unwrap();
        let sector = find_instrument("XLU").unwrap();
        assert_eq!(volatility_for(index), INDEX_VOLATILITY);
        assert_eq!(volatility_for(sector), SECTOR_VOLATILITY);
    }

    #[test]
    fn test_walk_with_neutral_draws_follows_trend() {
        // U = 0.5 cancels the random term, leaving only the drift
        let path = walk_backwards(100.0, 0.02, 2, || 0.5);

        assert_eq!(path.len(), 3);
        assert_eq!(path[2], 100.0);
        assert!((path[1] - 100.0 * (1.0 - TREND)).abs() < 1e-12);
        assert!((path[0] - 100.0 * (1.0 - TREND).powi(2)).abs() < 1e-12);
        assert!(path[0] < path[1] && path[1] < path[2]);
    }

    #[test]
    fn test_walk_with_zero_steps_is_just_base() {
        let path = walk_backwards(42.0, 0.025, 0, || 0.9);
        assert_eq!(path, vec![42.0]);
    }

    #[test]
    fn test_walk_stays_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        let path = walk_backwards(40.0, SECTOR_VOLATILITY, 730, || rng.random::<f64>());
        assert!(path.iter().all(|p| *p > 0.0 && p.is_finite()));
    }

    #[test]
    fn test_sample_dates_end_today() {
        let dates = sample_dates(today(), 3, 7);
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[3], today());
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 12, 20).unwrap());
    }

    #[test]
    fn test_date_label_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date_label(date), "Jan 5, 24");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(-0.456), -0.46);
        assert_eq!(round2(5000.0), 5000.0);
    }

    #[test]
    fn test_generate_five_days_daily() {
        let gspc = *find_instrument("^GSPC").unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let snapshot = generate(&[gspc], Period::FiveDays, Interval::Daily, today(), &mut rng);

        assert_eq!(snapshot.data.len(), 6);
        assert_eq!(snapshot.data[0].value("^GSPC"), Some(0.0));
        assert_eq!(snapshot.summary.len(), 1);
        assert_eq!(snapshot.summary[0].last_price, 5000.0);
        assert_eq!(snapshot.summary[0].name, "S&P 500");
        assert_eq!(snapshot.data[5].timestamp, "Jan 10, 24");
    }

    #[test]
    fn test_generate_unlisted_instrument_uses_fallback() {
        let custom = Instrument {
            symbol: "TEST",
            name: "Test Sector",
            category: InstrumentCategory::Sector,
            color: "#000000",
        };
        let mut rng = StdRng::seed_from_u64(1);

        let snapshot = generate(&[custom], Period::OneMonth, Interval::Weekly, today(), &mut rng);

        assert_eq!(snapshot.summary[0].last_price, FALLBACK_BASE_PRICE);
        assert!(snapshot.summary[0].percent_change.is_finite());
    }

    #[test]
    fn test_same_seed_same_snapshot() {
        let instruments = [*find_instrument("XLK").unwrap(), *find_instrument("^NDX").unwrap()];

        let a = generate(&instruments, Period::ThreeMonths, Interval::Daily, today(), &mut StdRng::seed_from_u64(9));
        let b = generate(&instruments, Period::ThreeMonths, Interval::Daily, today(), &mut StdRng::seed_from_u64(9));

        assert_eq!(a, b);
    }
}
