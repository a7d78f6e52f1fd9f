use chrono::{DateTime, Local, Utc};

/// Currency symbol shown in front of every amount
pub const CURRENCY_SYMBOL: &str = "R$";

/// Format seconds as zero-padded "HH:MM:SS"; hours are not capped at 24
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Round to `decimals` places with ties going away from zero.
///
/// `{:.N}` alone rounds exact ties to even, so 0.125 would print as 0.12.
fn round_half_away(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value.abs() * scale).round() / scale * value.signum()
}

/// Format an amount as "R$ D,DD"
///
/// Zero and NaN both collapse to the zero string; any other value, negative
/// ones included, is rounded to two decimals with a comma separator.
pub fn format_currency(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        return format!("{} 0,00", CURRENCY_SYMBOL);
    }
    let amount = format!("{:.2}", round_half_away(value, 2));
    format!("{} {}", CURRENCY_SYMBOL, amount.replacen('.', ",", 1))
}

/// Same as [`format_currency`], with absence treated like zero
pub fn format_optional_currency(value: Option<f64>) -> String {
    format_currency(value.unwrap_or(0.0))
}

/// Format percentage with 1 decimal place
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", round_half_away(value, 1))
}

/// Format an instant as local "dd/mm/yyyy HH:MM"
pub fn format_date_time(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}
