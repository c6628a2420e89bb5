use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod page;
pub mod report;
pub mod week;

pub use config::Config;
pub use db::{DonationSource, SupabaseClient};
pub use errors::{AppError, ExportError, FetchError};
pub use report::{SourceFailure, WeeklyReport};

/// Flat platform cut deducted from every table's weekly total.
pub const PLATFORM_FEE_RATE: f64 = 0.05;

/// A donation row as returned by the table read. Rows come from an external
/// writer and are not trusted to be well-formed: `created_at` stays raw text
/// until the aggregator parses it, and `amount` only survives as a number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationRecord {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "numeric_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub review_status: Option<String>,
}

fn numeric_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Half-open settlement window `[start, end)`, always exactly seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl WeekRange {
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutSummary {
    pub table: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_donations: f64,
    pub platform_fee: f64,
    pub net_payout: f64,
}

impl PayoutSummary {
    /// Builds a summary from the unrounded weekly sum; fee and net are
    /// derived before any rounding, then all three are rounded for display.
    pub fn new(table: &str, window: &WeekRange, total: f64) -> Self {
        let fee = total * PLATFORM_FEE_RATE;
        let net = total - fee;

        PayoutSummary {
            table: table.to_string(),
            from: window.start.date_naive(),
            to: window.end.date_naive(),
            total_donations: round2(total),
            platform_fee: round2(fee),
            net_payout: round2(net),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub total_donations: f64,
    pub platform_fee: f64,
    pub net_payout: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
