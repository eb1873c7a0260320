//! Field-level deserializers that never fail
//!
//! API records arrive with numbers as strings, numbers as numbers, nulls and
//! the occasional junk value. A bad field degrades to a neutral value so the
//! rest of the record still counts.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::RawTimestamp;

/// Read a numeric field, falling back to 0
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0.0, parse_number))
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(RawTimestamp::from_value))
}

/// Read an identifier-like field; numbers are rendered as text
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn parse_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_float_prefix(s),
        _ => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Parse the longest leading float in `s` ("300abc" -> 300, " 12.5 " -> 12.5)
pub(crate) fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        mantissa_digits += end - frac_start;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_float_prefix_matches_browser_semantics() {
        assert_eq!(parse_float_prefix("60"), 60.0);
        assert_eq!(parse_float_prefix(" 12.5 "), 12.5);
        assert_eq!(parse_float_prefix("300abc"), 300.0);
        assert_eq!(parse_float_prefix("-4.25"), -4.25);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert_eq!(parse_float_prefix("1e3"), 1000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
    }

    #[test]
    fn parse_float_prefix_garbage_is_zero() {
        assert_eq!(parse_float_prefix(""), 0.0);
        assert_eq!(parse_float_prefix("abc"), 0.0);
        assert_eq!(parse_float_prefix("-"), 0.0);
        assert_eq!(parse_float_prefix("."), 0.0);
    }

    #[test]
    fn parse_number_handles_every_json_kind() {
        assert_eq!(parse_number(&json!(42)), 42.0);
        assert_eq!(parse_number(&json!(1.5)), 1.5);
        assert_eq!(parse_number(&json!("7")), 7.0);
        assert_eq!(parse_number(&json!(null)), 0.0);
        assert_eq!(parse_number(&json!(true)), 0.0);
        assert_eq!(parse_number(&json!({"a": 1})), 0.0);
        assert_eq!(parse_number(&json!("1e400")), 0.0);
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        amount: f64,
        #[serde(default, deserialize_with = "text")]
        id: Option<String>,
        #[serde(default, deserialize_with = "timestamp")]
        at: Option<RawTimestamp>,
    }

    #[test]
    fn deserializers_degrade_instead_of_failing() {
        let p: Probe = serde_json::from_value(json!({
            "amount": "oops",
            "id": 7,
            "at": false
        }))
        .unwrap();
        assert_eq!(p.amount, 0.0);
        assert_eq!(p.id.as_deref(), Some("7"));
        assert!(p.at.is_none());
    }

    #[test]
    fn deserializers_default_when_missing() {
        let p: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.amount, 0.0);
        assert!(p.id.is_none());
        assert!(p.at.is_none());
    }
}
