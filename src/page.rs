use crate::report::WeeklyReport;

/// Renders the report page: one summary row per table, the three aggregate
/// metrics, and the download link. Fetch failures show up as banners above
/// the table so a partial report is visibly partial.
pub fn render_report(report: &WeeklyReport) -> String {
    let mut body = String::new();

    body.push_str("<h1>💸 HyperChat Weekly Payout Report</h1>\n");

    for failure in &report.failures {
        body.push_str(&format!(
            "<p class=\"error\">Failed to load table {}: {}</p>\n",
            escape(&failure.table),
            escape(&failure.error)
        ));
    }

    if report.summaries.is_empty() {
        body.push_str("<p class=\"warning\">No valid donations found for this week.</p>\n");
        return wrap_page(&body);
    }

    body.push_str(&format!(
        "<h2>Payout Summary (IST): {} – {}</h2>\n",
        report.window.start.format("%d %b %Y"),
        report.window.end.format("%d %b %Y")
    ));

    body.push_str(
        "<table>\n<tr><th>table</th><th>from</th><th>to</th>\
         <th>total_donations</th><th>platform_fee</th><th>net_payout</th></tr>\n",
    );
    for summary in &report.summaries {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&summary.table),
            summary.from,
            summary.to,
            format_currency(summary.total_donations),
            format_currency(summary.platform_fee),
            format_currency(summary.net_payout)
        ));
    }
    body.push_str("</table>\n");

    let totals = report.totals();
    body.push_str(&format!(
        "<div class=\"metrics\">\
         <div><span>🎯 Total Donations</span><strong>{}</strong></div>\
         <div><span>💼 Platform Fee (5%)</span><strong>{}</strong></div>\
         <div><span>💰 Net Payout</span><strong>{}</strong></div>\
         </div>\n",
        format_currency(totals.total_donations),
        format_currency(totals.platform_fee),
        format_currency(totals.net_payout)
    ));

    body.push_str("<p><a class=\"download\" href=\"/report.csv\">📥 Download CSV Report</a></p>\n");

    wrap_page(&body)
}

fn wrap_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>HyperChat Weekly Payout</title>\n<style>{STYLE}</style>\n\
         </head>\n<body>\n{body}</body>\n</html>\n"
    )
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:60rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem .6rem;text-align:left}\
.metrics{display:flex;gap:2rem;margin:1rem 0}\
.metrics span{display:block;color:#555}\
.error{color:#b00020}\
.warning{color:#8a6d3b}";

/// `₹` with two decimals and western thousands grouping.
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap();

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("₹{sign}{grouped}.{frac_part}")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
