//! Numeric and unit helpers shared by the grammars.

use td_protocol::FrequencyUnit;

/// Parse a strictly positive, finite number.
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse a positive number and truncate it to a whole count.
///
/// Values that truncate to zero (e.g. "0.5") are rejected.
pub fn parse_count(raw: &str) -> Option<u64> {
    let value = parse_positive(raw)?.trunc();
    (value >= 1.0).then_some(value as u64)
}

/// Normalize a frequency word by prefix: "minute", "hour" or "day".
pub fn parse_frequency_unit(raw: &str) -> Option<FrequencyUnit> {
    let word = raw.trim().to_ascii_lowercase();
    if word.starts_with("minute") {
        Some(FrequencyUnit::Minutes)
    } else if word.starts_with("hour") {
        Some(FrequencyUnit::Hours)
    } else if word.starts_with("day") {
        Some(FrequencyUnit::Days)
    } else {
        None
    }
}

/// Round for display in messages so float noise like 99.99000000000001 stays out.
pub fn round_for_display(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
