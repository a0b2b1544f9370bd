//! Value and time formatting rules used by the binding step.

use crate::error::{MarketError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};

/// Fraction digits shown for numbers whose variable declares no precision.
pub const DEFAULT_MAX_FRACTION_DIGITS: u32 = 3;

/// Asia/Shanghai is UTC+08:00 all year (no DST since 1991).
const SHANGHAI_OFFSET_SECS: i32 = 8 * 3600;

/// ISO 8601 layouts with an explicit offset that RFC 3339 parsing rejects
/// (missing seconds, `+0000` without a colon). `%#z` also accepts `Z`.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Naive layouts accepted for attestation times, interpreted as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse the attestation instant.
///
/// Accepts RFC 3339 strings, naive date-times and bare dates (both read as
/// UTC), and JSON numbers holding epoch milliseconds.
///
/// # Errors
///
/// * `MarketError::InvalidAttestationTime` - missing, null, empty, or unparsable value
pub fn parse_attestation_time(value: Option<&Value>) -> Result<DateTime<Utc>> {
    match value {
        None | Some(Value::Null) => Err(MarketError::InvalidAttestationTime(
            "attestationTime is required".to_string(),
        )),
        Some(Value::String(s)) => parse_instant_str(s.trim()).ok_or_else(|| {
            MarketError::InvalidAttestationTime(format!("'{}' is not a valid instant", s))
        }),
        Some(Value::Number(n)) => epoch_millis(n)
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                MarketError::InvalidAttestationTime(format!(
                    "{} is not a valid epoch-milliseconds instant",
                    n
                ))
            }),
        Some(other) => Err(MarketError::InvalidAttestationTime(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

fn parse_instant_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(s, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn epoch_millis(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

/// `Feb 20, 2025 12:00`
pub fn display_time(instant: &DateTime<Utc>) -> String {
    instant.format("%b %-d, %Y %H:%M").to_string()
}

/// `2025-02-20`
pub fn utc_date(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// `February 20, 2025 12:00:00`
pub fn long_time(instant: &DateTime<Utc>) -> String {
    instant.format("%B %-d, %Y %H:%M:%S").to_string()
}

/// The instant as Asia/Shanghai wall-clock time, `2025-02-20 20:00:00`.
pub fn shanghai_time(instant: &DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(SHANGHAI_OFFSET_SECS).expect("Invalid Shanghai offset");
    instant
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Render a caller value as a binding string. `null` has no rendering.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_string(n)),
        other => Some(other.to_string()),
    }
}

/// Plain decimal rendering; integral floats drop their `.0`.
pub fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Read a numeric caller value, accepting numeric strings.
pub fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// en-US grouped decimal: `1234567.891` → `1,234,567.891`.
///
/// Rounds to at most `max_fraction_digits` and drops trailing fractional zeros.
/// A non-zero value that would round to zero is shown in full instead.
pub fn format_grouped(value: f64, max_fraction_digits: u32) -> String {
    let rounded = format!("{:.*}", max_fraction_digits as usize, value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if is_zero && value != 0.0 {
        return value.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
