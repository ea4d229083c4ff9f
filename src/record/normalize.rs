use chrono::{DateTime, Utc};

use crate::address::HashType;

/// Rewrite a leading `\x` (bytea escape) to `0x`; everything else passes through.
pub fn normalize_hex_prefix(value: &str) -> String {
    match value.strip_prefix("\\x") {
        Some(rest) => format!("0x{}", rest),
        None => value.to_string(),
    }
}

/// Parse an integer-valued number, accepting float notation for whole values
/// (`"1e3"`, `"12.0"`). Fractional or non-finite input yields `None`.
pub fn integer_or_null(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Empty input and the `-1` sentinel map to `None`, as does anything unparseable.
pub fn number_or_null(value: &str) -> Option<i64> {
    if value.is_empty() || value == "-1" {
        return None;
    }
    integer_or_null(value)
}

/// Required integer columns degrade to `0` instead of failing the row.
pub fn int_or_zero(value: &str) -> i64 {
    integer_or_null(value).unwrap_or(0)
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_utc_millis(value: &str) -> Option<String> {
    let millis = number_or_null(value)?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Resolve a hash-type column: numeric codes and names map onto the known
/// variants, anything else is lower-cased, and an empty value means `type`.
pub fn resolve_hash_type(value: &str) -> HashType {
    match value {
        "" | "1" | "type" => HashType::Type,
        "0" | "data" => HashType::Data,
        "2" | "data1" => HashType::Data1,
        "4" | "data2" => HashType::Data2,
        other => {
            let lower = other.to_lowercase();
            HashType::from_name(&lower).unwrap_or(HashType::Other(lower))
        }
    }
}
