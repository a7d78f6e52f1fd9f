use crate::domain::{
    format_currency, format_duration, format_percent, ConfigState, Configuration, PauseRecord,
};
use crate::persistence::{load_config, report_file, FileStore, PauseRecordStore};
use crate::report::stats::{
    category_breakdown, daily_summary, monthly_summary, percent_of_workday_rested, records_on_day,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Render the markdown report for the day of `reference`
pub fn render_report<Tz: TimeZone>(
    records: &[PauseRecord],
    config: Option<&Configuration>,
    reference: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let today = daily_summary(records, reference);
    let month = monthly_summary(records, reference);
    let todays_records = records_on_day(records, reference);

    let mut report = String::new();

    report.push_str(&format!("# Break Report - {}\n\n", reference.format("%Y-%m-%d")));

    // Configuration
    report.push_str("## Settings\n\n");
    match config {
        Some(config) => {
            report.push_str(&format!(
                "- **Monthly salary:** {}\n",
                format_currency(config.monthly_salary)
            ));
            report.push_str(&format!("- **Hours per day:** {}\n", config.hours_per_day));
            if let Ok(rates) = config.rates() {
                report.push_str(&format!("- **Hourly rate:** {}\n", format_currency(rates.hourly)));
            }
        }
        None => report.push_str("- Not configured yet\n"),
    }
    report.push('\n');

    // Today
    report.push_str("## Today\n\n");
    report.push_str(&format!(
        "- **Time rested:** {} ({} breaks)\n",
        format_duration(today.total_seconds),
        today.count
    ));
    report.push_str(&format!(
        "- **Value earned resting:** {}\n",
        format_currency(today.total_value)
    ));
    if let Some(percent) =
        config.and_then(|c| percent_of_workday_rested(today.total_seconds, c.hours_per_day))
    {
        report.push_str(&format!("- **Share of workday rested:** {}\n", format_percent(percent)));
    }
    report.push('\n');

    // Month
    report.push_str("## This Month\n\n");
    report.push_str(&format!(
        "- **Time rested:** {} ({} breaks)\n",
        format_duration(month.total_seconds),
        month.count
    ));
    report.push_str(&format!(
        "- **Value earned resting:** {}\n\n",
        format_currency(month.total_value)
    ));

    // Categories
    let breakdown = category_breakdown(todays_records.iter().copied());
    if !breakdown.is_empty() {
        report.push_str("## Categories Today\n\n");
        report.push_str("| Category | Breaks | Time | Value |\n");
        report.push_str("|----------|--------|------|-------|\n");
        for (category, summary) in &breakdown {
            report.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                category.label(),
                summary.count,
                format_duration(summary.total_seconds),
                format_currency(summary.total_value)
            ));
        }
        report.push('\n');
    }

    // Breaks
    report.push_str("## Breaks Today\n\n");
    if todays_records.is_empty() {
        report.push_str("No breaks recorded.\n");
    } else {
        let tz = reference.timezone();
        for record in &todays_records {
            report.push_str(&format!(
                "- {} - {} · {} · {} · {}\n",
                record.start_time.with_timezone(&tz).format("%H:%M"),
                record.end_time.with_timezone(&tz).format("%H:%M"),
                format_duration(record.duration_seconds),
                format_currency(record.value_earned),
                record.category.label()
            ));
        }
    }

    report
}

/// Generate a report for the specified date and write it to disk
pub fn generate_report(
    store: Arc<FileStore>,
    date: Option<NaiveDate>,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report_date = date.unwrap_or_else(|| Local::now().date_naive());
    let noon = report_date
        .and_hms_opt(12, 0, 0)
        .context("Invalid report time")?;
    let reference = Local
        .from_local_datetime(&noon)
        .earliest()
        .context("Report date does not exist in the local time zone")?;

    let config = load_config(store.as_ref()).context("Failed to load configuration")?;
    let records = PauseRecordStore::new(store.clone())
        .list()
        .context("Failed to load pause history")?;

    let report = render_report(
        &records,
        match &config {
            ConfigState::Configured(c) => Some(c),
            ConfigState::Unconfigured => None,
        },
        &reference,
    );

    let output = output_path.unwrap_or_else(|| report_file(store.dir(), report_date));
    std::fs::write(&output, report)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    info!(path = %output.display(), "report written");
    Ok(output)
}
