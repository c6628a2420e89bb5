use chrono::DateTime;
use serde::Serialize;

use crate::{DonationRecord, PayoutSummary, ReportTotals, WeekRange, db::DonationSource};

/// A table whose fetch failed. The table is dropped from the summaries but
/// the failure is surfaced to the reader instead of aborting the report.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub table: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub window: WeekRange,
    pub summaries: Vec<PayoutSummary>,
    pub failures: Vec<SourceFailure>,
}

impl WeeklyReport {
    /// Column sums across all tables, feeding the page metrics.
    pub fn totals(&self) -> ReportTotals {
        self.summaries
            .iter()
            .fold(ReportTotals::default(), |acc, s| ReportTotals {
                total_donations: acc.total_donations + s.total_donations,
                platform_fee: acc.platform_fee + s.platform_fee,
                net_payout: acc.net_payout + s.net_payout,
            })
    }
}

/// Fetches and reduces every configured table, one at a time. A failing
/// table is reported and skipped; the remaining tables still settle.
pub async fn build_weekly_report(
    source: &dyn DonationSource,
    tables: &[String],
    window: WeekRange,
) -> WeeklyReport {
    let mut summaries = Vec::with_capacity(tables.len());
    let mut failures = Vec::new();

    for table in tables {
        match source.fetch_all_rows(table).await {
            Ok(rows) => summaries.push(summarize_table(table, &rows, &window)),
            Err(err) => {
                tracing::warn!("failed to load table {table}: {err}");
                failures.push(SourceFailure {
                    table: table.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    WeeklyReport {
        window,
        summaries,
        failures,
    }
}

/// A row counts only if its payment succeeded, review approved it, and it
/// was created inside the window. Rows whose `created_at` does not parse
/// are dropped without aborting the table; amounts that are not numbers
/// contribute nothing.
pub fn summarize_table(table: &str, rows: &[DonationRecord], window: &WeekRange) -> PayoutSummary {
    let tz = window.start.timezone();
    let mut total = 0.0;

    for row in rows {
        let Some(raw) = row.created_at.as_deref() else {
            tracing::debug!("dropping row without created_at in {table}");
            continue;
        };
        let Ok(created_at) = DateTime::parse_from_rfc3339(raw) else {
            tracing::debug!("dropping row with unparsable created_at {raw:?} in {table}");
            continue;
        };

        let created_at_local = created_at.with_timezone(&tz);
        let qualifies = row.payment_status.as_deref() == Some("success")
            && row.review_status.as_deref() == Some("approved")
            && window.contains(created_at_local);

        if qualifies {
            if let Some(amount) = row.amount {
                total += amount;
            }
        }
    }

    PayoutSummary::new(table, window, total)
}
