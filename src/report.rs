use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{DashboardData, StatusCount};

fn share(count: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn write_mix(output: &mut String, heading: &str, rows: &[StatusCount], total: i64) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {heading}");

    if rows.is_empty() {
        let _ = writeln!(output, "No bookings recorded.");
        return;
    }

    let mut rows = rows.to_vec();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    for row in rows.iter() {
        let _ = writeln!(
            output,
            "- {}: {} bookings ({:.1}%)",
            row.status,
            row.count,
            share(row.count, total)
        );
    }
}

/// Renders a dashboard snapshot as Markdown. The trend section lists the most
/// recent `trend_days` days that have bookings.
pub fn build_report(data: &DashboardData, generated_on: NaiveDate, trend_days: usize) -> String {
    let summary = &data.summary;
    let mut output = String::new();

    let _ = writeln!(output, "# Booking Dashboard Report");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Total bookings: {}", summary.total_bookings);
    let _ = writeln!(output, "- Confirmed: {}", summary.confirmed);
    let _ = writeln!(output, "- Pending: {}", summary.pending);
    let _ = writeln!(output, "- Cancelled: {}", summary.cancelled);

    write_mix(&mut output, "Status Mix", &data.status_chart, summary.total_bookings);
    write_mix(&mut output, "Hotel Mix", &data.hotel_chart, summary.total_bookings);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Daily Trend");

    if data.trend_chart.is_empty() {
        let _ = writeln!(output, "No bookings recorded.");
    } else {
        let start = data.trend_chart.len().saturating_sub(trend_days);
        for point in data.trend_chart[start..].iter() {
            let _ = writeln!(output, "- {}: {}", point.date, point.count);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DashboardSummary, TrendData};

    fn count(status: &str, count: i64) -> StatusCount {
        StatusCount {
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn empty_dashboard_renders_placeholders() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
        let report = build_report(&DashboardData::default(), today, 7);

        assert!(report.starts_with("# Booking Dashboard Report\nGenerated on 2026-04-10\n"));
        assert!(report.contains("- Total bookings: 0"));
        assert_eq!(report.matches("No bookings recorded.").count(), 3);
    }

    #[test]
    fn mixes_are_ordered_by_count_with_shares() {
        let data = DashboardData {
            summary: DashboardSummary {
                total_bookings: 4,
                confirmed: 3,
                pending: 1,
                cancelled: 0,
            },
            status_chart: vec![count("Confirmed", 3), count("Pending", 1)],
            hotel_chart: vec![count("Hotel Grand", 1), count("Hotel Taj", 3)],
            trend_chart: Vec::new(),
        };
        let today = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
        let report = build_report(&data, today, 7);

        assert!(report.contains("- Confirmed: 3 bookings (75.0%)"));
        let taj = report.find("- Hotel Taj").unwrap();
        let grand = report.find("- Hotel Grand").unwrap();
        assert!(taj < grand);
    }

    #[test]
    fn trend_keeps_most_recent_days() {
        let data = DashboardData {
            trend_chart: (1..=5)
                .map(|day| TrendData {
                    date: format!("2026-01-0{day}"),
                    count: day,
                })
                .collect(),
            ..DashboardData::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        let report = build_report(&data, today, 2);

        assert!(!report.contains("2026-01-03"));
        assert!(report.contains("- 2026-01-04: 4"));
        assert!(report.contains("- 2026-01-05: 5"));
    }
}
