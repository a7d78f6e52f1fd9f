use crate::domain::{Category, PauseRecord};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Rested time and money over a set of breaks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub total_seconds: u64,
    pub total_value: f64,
    pub count: usize,
}

impl Summary {
    fn add(&mut self, record: &PauseRecord) {
        self.total_seconds += record.duration_seconds;
        self.total_value += record.value_earned;
        self.count += 1;
    }
}

/// Calendar date of a record's start in the reference's time zone
fn local_start_date<Tz: TimeZone>(record: &PauseRecord, tz: &Tz) -> NaiveDate {
    record.start_time.with_timezone(tz).date_naive()
}

/// Records that started on the same calendar day as `reference`
pub fn records_on_day<'a, Tz: TimeZone>(
    records: &'a [PauseRecord],
    reference: &DateTime<Tz>,
) -> Vec<&'a PauseRecord> {
    let tz = reference.timezone();
    let day = reference.date_naive();
    records
        .iter()
        .filter(|r| local_start_date(r, &tz) == day)
        .collect()
}

/// Records that started in the same year and month as `reference`
pub fn records_in_month<'a, Tz: TimeZone>(
    records: &'a [PauseRecord],
    reference: &DateTime<Tz>,
) -> Vec<&'a PauseRecord> {
    let tz = reference.timezone();
    let day = reference.date_naive();
    records
        .iter()
        .filter(|r| {
            let start = local_start_date(r, &tz);
            start.year() == day.year() && start.month() == day.month()
        })
        .collect()
}

fn summarize<'a>(records: impl IntoIterator<Item = &'a PauseRecord>) -> Summary {
    let mut summary = Summary::default();
    for record in records {
        summary.add(record);
    }
    summary
}

/// Totals for breaks that started on the reference day
pub fn daily_summary<Tz: TimeZone>(records: &[PauseRecord], reference: &DateTime<Tz>) -> Summary {
    summarize(records_on_day(records, reference))
}

/// Totals for breaks that started in the reference month
pub fn monthly_summary<Tz: TimeZone>(records: &[PauseRecord], reference: &DateTime<Tz>) -> Summary {
    summarize(records_in_month(records, reference))
}

/// Share of the workday spent resting, in percent; may exceed 100
pub fn percent_of_workday_rested(daily_total_seconds: u64, hours_per_day: f64) -> Option<f64> {
    if !(hours_per_day > 0.0) {
        return None;
    }
    Some(100.0 * daily_total_seconds as f64 / (hours_per_day * 3600.0))
}

/// Per-category totals in picker order, skipping empty categories
pub fn category_breakdown<'a>(
    records: impl IntoIterator<Item = &'a PauseRecord>,
) -> Vec<(Category, Summary)> {
    let mut totals: Vec<(Category, Summary)> = Category::all()
        .iter()
        .map(|c| (*c, Summary::default()))
        .collect();

    for record in records {
        if let Some((_, summary)) = totals.iter_mut().find(|(c, _)| *c == record.category) {
            summary.add(record);
        }
    }

    totals.retain(|(_, s)| s.count > 0);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};
    use pretty_assertions::assert_eq;

    fn record(start: DateTime<Utc>, seconds: u64, value: f64, category: Category) -> PauseRecord {
        PauseRecord {
            id: start.timestamp_millis().to_string(),
            start_time: start,
            end_time: start + Duration::seconds(seconds as i64),
            duration_seconds: seconds,
            value_earned: value,
            category,
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_summary_ignores_yesterday() {
        let today = utc(2024, 5, 10, 9);
        let records = vec![
            record(today, 600, 10.0, Category::Coffee),
            record(today - Duration::days(1), 600, 10.0, Category::Coffee),
        ];

        let summary = daily_summary(&records, &utc(2024, 5, 10, 17));
        assert_eq!(summary.total_seconds, 600);
        assert!((summary.total_value - 10.0).abs() < 1e-9);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_monthly_summary() {
        let records = vec![
            record(utc(2024, 5, 1, 9), 300, 2.0, Category::Lunch),
            record(utc(2024, 5, 31, 9), 120, 1.0, Category::Lunch),
            record(utc(2024, 4, 30, 9), 900, 5.0, Category::Lunch),
            record(utc(2023, 5, 15, 9), 900, 5.0, Category::Lunch),
        ];

        let summary = monthly_summary(&records, &utc(2024, 5, 20, 12));
        assert_eq!(summary.total_seconds, 420);
        assert!((summary.total_value - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_boundary_follows_reference_time_zone() {
        // 23:30 on the 9th in São Paulo is already the 10th in UTC
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        let late_break = Utc.with_ymd_and_hms(2024, 5, 10, 2, 30, 0).unwrap();
        let records = vec![record(late_break, 60, 1.0, Category::Other)];

        let on_ninth = sao_paulo.with_ymd_and_hms(2024, 5, 9, 12, 0, 0).unwrap();
        let on_tenth = sao_paulo.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(daily_summary(&records, &on_ninth).total_seconds, 60);
        assert_eq!(daily_summary(&records, &on_tenth).total_seconds, 0);
        assert_eq!(daily_summary(&records, &utc(2024, 5, 10, 12)).total_seconds, 60);
    }

    #[test]
    fn test_empty_history_summaries() {
        let summary = daily_summary(&[], &utc(2024, 5, 10, 9));
        assert_eq!(summary, Summary::default());
        assert_eq!(monthly_summary(&[], &utc(2024, 5, 10, 9)), Summary::default());
    }

    #[test]
    fn test_percent_of_workday_rested() {
        assert_eq!(percent_of_workday_rested(1440, 8.0), Some(5.0));
        assert_eq!(percent_of_workday_rested(0, 8.0), Some(0.0));
        assert_eq!(percent_of_workday_rested(36_000, 8.0), Some(125.0));
        assert_eq!(percent_of_workday_rested(600, 0.0), None);
        assert_eq!(percent_of_workday_rested(600, -1.0), None);
        assert_eq!(percent_of_workday_rested(600, f64::NAN), None);
    }

    #[test]
    fn test_category_breakdown() {
        let day = utc(2024, 5, 10, 9);
        let records = vec![
            record(day, 60, 1.0, Category::Coffee),
            record(day, 120, 2.0, Category::Uncategorized),
            record(day, 30, 0.5, Category::Coffee),
        ];

        let breakdown = category_breakdown(&records);
        let categories: Vec<Category> = breakdown.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, vec![Category::Uncategorized, Category::Coffee]);
        assert_eq!(breakdown[1].1.total_seconds, 90);
        assert_eq!(breakdown[1].1.count, 2);
    }
}
