//! Display formatting helpers.
//!
//! Every helper returns [`NOT_AVAILABLE`] when the input is not a usable number (null, a string,
//! `NaN`, or infinite). Otherwise formatting is fixed-decimal and deterministic.

use chrono::{DateTime, Datelike, NaiveDate};

use crate::types::Value;

/// Placeholder shown for missing or non-numeric values.
pub const NOT_AVAILABLE: &str = "N/A";

fn usable(value: &Value) -> Option<f64> {
    value.as_number().filter(|v| v.is_finite())
}

/// Fixed decimals with en-US thousands separators: `1234.5` with 1 decimal is `"1,234.5"`.
pub fn format_number(value: &Value, decimals: usize) -> String {
    match usable(value) {
        Some(v) => group_thousands(&format!("{v:.decimals$}")),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// en-US currency formatting, e.g. `"-$1,234.50"` for `USD`.
///
/// `USD`, `EUR`, `GBP`, `JPY`, and `KRW` use their symbols (yen and won without decimals); other
/// codes are written as a `"<CODE> "` prefix with two decimals.
pub fn format_currency(value: &Value, currency: &str) -> String {
    let Some(v) = usable(value) else {
        return NOT_AVAILABLE.to_string();
    };
    let code = currency.to_ascii_uppercase();
    let (prefix, decimals) = match code.as_str() {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        "KRW" => ("₩".to_string(), 0),
        _ => (format!("{code} "), 2),
    };
    let digits = group_thousands(&format!("{:.decimals$}", v.abs()));
    let sign = if v < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{prefix}{digits}")
}

/// Fixed decimals followed by `%`, without grouping: `12.346` with 2 decimals is `"12.35%"`.
pub fn format_percent(value: &Value, decimals: usize) -> String {
    match usable(value) {
        Some(v) => format!("{v:.decimals$}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Compact magnitude: millions get an `M` suffix, thousands a `K`, smaller values are fixed.
pub fn format_compact(value: &Value, decimals: usize) -> String {
    match usable(value) {
        Some(v) if v >= 1_000_000.0 => format!("{:.decimals$}M", v / 1_000_000.0),
        Some(v) if v >= 1_000.0 => format!("{:.decimals$}K", v / 1_000.0),
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Korean short date (`"2024. 1. 5."`) from an RFC 3339 timestamp or a `YYYY-MM-DD` date.
///
/// Empty or unparseable input gives [`NOT_AVAILABLE`]. Timestamps keep the calendar date of their
/// own offset.
pub fn format_date(text: &str) -> String {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()));
    match date {
        Some(d) => format!("{}. {}. {}.", d.year(), d.month(), d.day()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Insert `,` every three digits of the integer part of an already-fixed number.
fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_non_numeric_inputs_are_not_available() {
        for value in [
            Value::Null,
            Value::from("N/A"),
            Value::from("Korea"),
            Value::Number(f64::NAN),
            Value::Number(f64::INFINITY),
        ] {
            assert_eq!(format_number(&value, 0), "N/A");
            assert_eq!(format_percent(&value, 2), "N/A");
            assert_eq!(format_currency(&value, "USD"), "N/A");
            assert_eq!(format_compact(&value, 1), "N/A");
        }
        assert_eq!(format_date(""), "N/A");
        assert_eq!(format_date("yesterday"), "N/A");
    }

    #[test]
    fn number_uses_grouping_and_fixed_decimals() {
        assert_eq!(format_number(&Value::Number(1234567.891), 0), "1,234,568");
        assert_eq!(format_number(&Value::Number(1234.5), 1), "1,234.5");
        assert_eq!(format_number(&Value::Number(-987654.0), 2), "-987,654.00");
        assert_eq!(format_number(&Value::Number(12.0), 0), "12");
        assert_eq!(format_number(&Value::Number(999.0), 0), "999");
    }

    #[test]
    fn currency_symbols_and_signs() {
        assert_eq!(format_currency(&Value::Number(1234.5), "USD"), "$1,234.50");
        assert_eq!(format_currency(&Value::Number(-1234.5), "usd"), "-$1,234.50");
        assert_eq!(format_currency(&Value::Number(1500.0), "EUR"), "€1,500.00");
        assert_eq!(format_currency(&Value::Number(35000.4), "KRW"), "₩35,000");
        assert_eq!(format_currency(&Value::Number(10.0), "CHF"), "CHF 10.00");
        assert_eq!(format_currency(&Value::Number(-0.001), "USD"), "$0.00");
    }

    #[test]
    fn percent_is_fixed_without_grouping() {
        assert_eq!(format_percent(&Value::Number(12.346), 2), "12.35%");
        assert_eq!(format_percent(&Value::Number(12345.0), 1), "12345.0%");
        assert_eq!(format_percent(&Value::Number(-3.0), 0), "-3%");
    }

    #[test]
    fn compact_suffixes() {
        assert_eq!(format_compact(&Value::Number(2_500_000.0), 1), "2.5M");
        assert_eq!(format_compact(&Value::Number(1_600.0), 0), "2K");
        assert_eq!(format_compact(&Value::Number(999.0), 0), "999");
        assert_eq!(format_compact(&Value::Number(-5_000.0), 0), "-5000");
    }

    #[test]
    fn dates_render_korean_short_form() {
        assert_eq!(format_date("2024-01-05"), "2024. 1. 5.");
        assert_eq!(format_date("2023-12-31T23:30:00+09:00"), "2023. 12. 31.");
    }
}
