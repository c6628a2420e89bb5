use chrono::{DateTime, Datelike, Duration, FixedOffset, Weekday};

use crate::WeekRange;

/// Settlement weeks open and close at midnight on this weekday.
pub const SETTLEMENT_DAY: Weekday = Weekday::Fri;

/// Reports are computed in Indian Standard Time. IST is UTC+05:30 year
/// round (no DST), so a fixed offset is exact.
pub fn report_timezone() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

/// Returns the most recently *completed* settlement week before `now`.
///
/// The offset always includes a full extra week: even when `now` falls on
/// the settlement weekday itself, the window ends at that day's midnight
/// rather than starting there. The week currently in progress is never
/// reported, since its rows are still arriving.
pub fn settlement_week(now: DateTime<FixedOffset>) -> WeekRange {
    let days_back = (7 + now.weekday().num_days_from_monday()
        - SETTLEMENT_DAY.num_days_from_monday())
        % 7
        + 7;
    let start = (now.date_naive() - Duration::days(i64::from(days_back)))
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(now.timezone())
        .unwrap();

    WeekRange {
        start,
        end: start + Duration::days(7),
    }
}
