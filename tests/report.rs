use std::collections::HashMap;

use async_trait::async_trait;
use chrono::TimeZone;
use hyperchat_payout::{
    DonationRecord, DonationSource, FetchError, WeekRange,
    report::build_weekly_report,
    week::{report_timezone, settlement_week},
};

/// In-memory stand-in for the Supabase client: each table either yields its
/// canned rows or fails with the given status.
struct StubSource {
    tables: HashMap<String, Result<Vec<DonationRecord>, u16>>,
}

#[async_trait]
impl DonationSource for StubSource {
    async fn fetch_all_rows(&self, table: &str) -> Result<Vec<DonationRecord>, FetchError> {
        match self.tables.get(table) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(status)) => Err(FetchError::Status(
                reqwest::StatusCode::from_u16(*status).unwrap(),
            )),
            None => Ok(Vec::new()),
        }
    }
}

fn test_window() -> WeekRange {
    let now = report_timezone()
        .with_ymd_and_hms(2025, 8, 6, 12, 0, 0)
        .unwrap();
    settlement_week(now)
}

fn donation(created_at: &str, amount: f64, payment: &str, review: &str) -> DonationRecord {
    DonationRecord {
        created_at: Some(created_at.to_string()),
        amount: Some(amount),
        payment_status: Some(payment.to_string()),
        review_status: Some(review.to_string()),
    }
}

#[tokio::test]
async fn settles_each_configured_table() {
    let mut tables = HashMap::new();
    tables.insert(
        "chiaa_gaming_donations".to_string(),
        Ok(vec![
            donation("2025-07-26T10:00:00Z", 1000.0, "success", "approved"),
            donation("2025-07-27T10:00:00Z", 500.0, "success", "approved"),
            donation("2025-07-28T10:00:00Z", 300.0, "pending", "approved"),
        ]),
    );
    tables.insert("quiet_donations".to_string(), Ok(vec![]));

    let source = StubSource { tables };
    let configured = vec![
        "chiaa_gaming_donations".to_string(),
        "quiet_donations".to_string(),
    ];
    let report = build_weekly_report(&source, &configured, test_window()).await;

    assert!(report.failures.is_empty());
    assert_eq!(report.summaries.len(), 2);
    assert_eq!(report.summaries[0].table, "chiaa_gaming_donations");
    assert_eq!(report.summaries[0].total_donations, 1500.00);
    assert_eq!(report.summaries[0].platform_fee, 75.00);
    assert_eq!(report.summaries[0].net_payout, 1425.00);
    assert_eq!(report.summaries[1].total_donations, 0.00);

    let totals = report.totals();
    assert_eq!(totals.total_donations, 1500.00);
    assert_eq!(totals.platform_fee, 75.00);
    assert_eq!(totals.net_payout, 1425.00);
}

#[tokio::test]
async fn failing_table_does_not_block_the_rest() {
    let mut tables = HashMap::new();
    tables.insert("broken_donations".to_string(), Err(500));
    tables.insert(
        "working_donations".to_string(),
        Ok(vec![donation("2025-07-29T09:00:00Z", 250.0, "success", "approved")]),
    );

    let source = StubSource { tables };
    let configured = vec![
        "broken_donations".to_string(),
        "working_donations".to_string(),
    ];
    let report = build_weekly_report(&source, &configured, test_window()).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].table, "broken_donations");
    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].table, "working_donations");
    assert_eq!(report.summaries[0].total_donations, 250.00);
}

#[tokio::test]
async fn no_tables_means_no_summaries() {
    let source = StubSource {
        tables: HashMap::new(),
    };
    let report = build_weekly_report(&source, &[], test_window()).await;

    assert!(report.summaries.is_empty());
    assert!(report.failures.is_empty());
}
