//! Display helpers shared by every view. All functions are pure; instants are
//! shifted into the caller's display offset before formatting.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// `HH:MM`, 24-hour clock.
pub fn format_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%H:%M").to_string()
}

/// `DD.MM.YYYY`.
pub fn format_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%d.%m.%Y").to_string()
}

/// `2 November 2026, 07:30`.
pub fn format_long_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%-d %B %Y, %H:%M").to_string()
}

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "TRY" => "₺",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

/// Amount with `.` thousands grouping, followed by the currency symbol.
/// Whole amounts drop the decimal part: `1.250 ₺`, `1.250,50 ₺`.
pub fn format_price(amount: f64, currency: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    if fraction == 0 {
        format!("{}{} {}", sign, whole, currency_symbol(currency))
    } else {
        format!("{}{},{:02} {}", sign, whole, fraction, currency_symbol(currency))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `2h 15m`. Negative spans render as zero.
pub fn format_duration(span: Duration) -> String {
    let minutes = span.num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn stops_label(stops: u32) -> String {
    match stops {
        0 => "Direct".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{} stops", n),
    }
}

/// Whole days from `today` until `date`; negative when the date has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}
