//! Loose value coercion for hand-edited sheets and webhook bodies.
//!
//! Spreadsheet exports and webhook senders hand us numbers as JSON numbers,
//! numeric strings or blanks. These helpers read all of them the same way.

use serde_json::Value;

/// Parse a text field as a number. Blank text reads as zero; anything
/// unparsable or non-finite yields `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    t.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric reading of an arbitrary JSON value.
pub fn value_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    }
}

/// A number that is present, parsable and non-zero; otherwise `None` so the
/// caller can substitute its default.
pub fn nonzero_number(v: Option<&Value>) -> Option<f64> {
    v.and_then(value_number).filter(|n| *n != 0.0)
}

/// Seat counts are whole numbers; fractional input is truncated toward zero.
pub fn to_count(n: f64) -> i64 {
    n.trunc() as i64
}

/// Render a JSON value the way a spreadsheet cell displays it: integers
/// without a trailing `.0`, `null` as empty text.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => format!("{f}"),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whether a JSON value counts as "set": not null, false, zero or empty text.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_number_handles_blank_and_garbage() {
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number(" 20 "), Some(20.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn nonzero_number_falls_back_on_zero_and_missing() {
        assert_eq!(nonzero_number(None), None);
        assert_eq!(nonzero_number(Some(&json!(0))), None);
        assert_eq!(nonzero_number(Some(&json!("x"))), None);
        assert_eq!(nonzero_number(Some(&json!("5"))), Some(5.0));
        assert_eq!(nonzero_number(Some(&json!(-2))), Some(-2.0));
    }

    #[test]
    fn display_value_drops_trailing_zero() {
        assert_eq!(display_value(&json!(3.0)), "3");
        assert_eq!(display_value(&json!(3.5)), "3.5");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!("〇")), "〇");
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }
}
