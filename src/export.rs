use crate::{PayoutSummary, WeekRange, errors::ExportError};

const CSV_HEADER: [&str; 6] = [
    "table",
    "from",
    "to",
    "total_donations",
    "platform_fee",
    "net_payout",
];

/// Renders the summaries as UTF-8 CSV, one row per table. The header is
/// written explicitly so an empty report still exports a well-formed file.
pub fn render_csv(summaries: &[PayoutSummary]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buffer);
        writer.write_record(CSV_HEADER)?;
        for summary in summaries {
            writer.serialize(summary)?;
        }
        writer.flush()?;
    }

    Ok(buffer)
}

pub fn file_name(window: &WeekRange) -> String {
    format!(
        "hyperchat_payout_{}_to_{}.csv",
        window.start.format("%Y%m%d"),
        window.end.format("%Y%m%d")
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::week::{report_timezone, settlement_week};

    fn test_window() -> WeekRange {
        let now = report_timezone()
            .with_ymd_and_hms(2025, 8, 6, 12, 0, 0)
            .unwrap();
        settlement_week(now)
    }

    #[test]
    fn csv_has_header_and_one_row_per_table() {
        let window = test_window();
        let summaries = vec![
            PayoutSummary::new("chiaa_gaming_donations", &window, 1500.0),
            PayoutSummary::new("other_donations", &window, 0.0),
        ];

        let bytes = render_csv(&summaries).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("table,from,to,total_donations,platform_fee,net_payout")
        );
        assert_eq!(
            lines.next(),
            Some("chiaa_gaming_donations,2025-07-25,2025-08-01,1500.0,75.0,1425.0")
        );
        assert_eq!(
            lines.next(),
            Some("other_donations,2025-07-25,2025-08-01,0.0,0.0,0.0")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_report_still_exports_the_header() {
        let bytes = render_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "table,from,to,total_donations,platform_fee,net_payout\n"
        );
    }

    #[test]
    fn file_name_encodes_the_window_boundaries() {
        assert_eq!(
            file_name(&test_window()),
            "hyperchat_payout_20250725_to_20250801.csv"
        );
    }
}
