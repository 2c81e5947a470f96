use serde::{Deserialize, Serialize};

/// How far back history is simulated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "2mo")]
    TwoMonths,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::TwoMonths,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
    ];

    pub fn days(&self) -> u32 {
        match self {
            Period::OneDay => 1,
            Period::FiveDays => 5,
            Period::OneMonth => 30,
            Period::TwoMonths => 60,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
            Period::TwoYears => 730,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::TwoMonths => "2mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
        }
    }

    /// Human-readable horizon, used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneDay => "1 day",
            Period::FiveDays => "5 days",
            Period::OneMonth => "1 month",
            Period::TwoMonths => "2 months",
            Period::ThreeMonths => "3 months",
            Period::SixMonths => "6 months",
            Period::OneYear => "1 year",
            Period::TwoYears => "2 years",
        }
    }
}

/// Sampling step between generated points.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    pub fn days(&self) -> u32 {
        match self {
            Interval::Daily => 1,
            Interval::Weekly => 7,
            Interval::Monthly => 30,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

/// Listing entry for `GET /api/market/periods`.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodInfo {
    pub code: &'static str,
    pub days: u32,
    pub label: &'static str,
}

impl From<Period> for PeriodInfo {
    fn from(period: Period) -> Self {
        Self {
            code: period.code(),
            days: period.days(),
            label: period.label(),
        }
    }
}

/// Listing entry for `GET /api/market/intervals`.
#[derive(Debug, Clone, Serialize)]
pub struct IntervalInfo {
    pub code: &'static str,
    pub days: u32,
}

impl From<Interval> for IntervalInfo {
    fn from(interval: Interval) -> Self {
        Self {
            code: interval.code(),
            days: interval.days(),
        }
    }
}
