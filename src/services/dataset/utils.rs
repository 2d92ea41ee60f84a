use crate::models::Value;
use once_cell::sync::Lazy;
use regex::Regex;

static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid decimal pattern")
});

static INFINITY_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?)Infinity$").expect("valid infinity pattern"));

static RADIX_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0(?:[xX](?P<hex>[0-9a-fA-F]+)|[oO](?P<oct>[0-7]+)|[bB](?P<bin>[01]+))$")
        .expect("valid radix pattern")
});

/// Coerce a cell to a number using browser `Number()` rules.
///
/// Returns `None` where that conversion would give NaN. Missing cells are the
/// caller's concern; blank text is not coerced to zero here.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Absent | Value::Null => None,
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) if n.is_nan() => None,
        Value::Number(n) => Some(*n),
        Value::Text(text) => parse_number_literal(text.trim()),
    }
}

fn parse_number_literal(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    if DECIMAL_LITERAL.is_match(text) {
        return text.parse::<f64>().ok();
    }
    if let Some(caps) = INFINITY_LITERAL.captures(text) {
        return Some(if &caps[1] == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    let caps = RADIX_LITERAL.captures(text)?;
    let (digits, radix) = if let Some(m) = caps.name("hex") {
        (m.as_str(), 16)
    } else if let Some(m) = caps.name("oct") {
        (m.as_str(), 8)
    } else {
        (caps.name("bin")?.as_str(), 2)
    };
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_cell(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn decimal_literals_coerce() {
        assert_eq!(coerce_number(&text("42")), Some(42.0));
        assert_eq!(coerce_number(&text(" -1.5 ")), Some(-1.5));
        assert_eq!(coerce_number(&text(".5")), Some(0.5));
        assert_eq!(coerce_number(&text("5.")), Some(5.0));
        assert_eq!(coerce_number(&text("+2e3")), Some(2000.0));
    }

    #[test]
    fn special_literals_coerce() {
        assert_eq!(coerce_number(&text("Infinity")), Some(f64::INFINITY));
        assert_eq!(coerce_number(&text("-Infinity")), Some(f64::NEG_INFINITY));
        assert_eq!(coerce_number(&text("0x1F")), Some(31.0));
        assert_eq!(coerce_number(&text("0o17")), Some(15.0));
        assert_eq!(coerce_number(&text("0b101")), Some(5.0));
    }

    #[test]
    fn non_numbers_stay_nan() {
        for raw in ["NaN", "inf", "infinity", "1,000", "abc", "1e", "-0x10", "1_000", ""] {
            assert_eq!(coerce_number(&text(raw)), None, "{raw:?} should not coerce");
        }
        assert_eq!(coerce_number(&Value::Null), None);
        assert_eq!(coerce_number(&Value::Absent), None);
        assert_eq!(coerce_number(&Value::Number(f64::NAN)), None);
    }

    #[test]
    fn booleans_coerce_to_bits() {
        assert_eq!(coerce_number(&Value::Bool(true)), Some(1.0));
        assert_eq!(coerce_number(&Value::Bool(false)), Some(0.0));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_cell("short", 50), "short");
        assert_eq!(truncate_cell("abcdef", 3), "abc...");
        assert_eq!(truncate_cell("ééééé", 2), "éé...");
        assert_eq!(truncate_cell("abc", 3), "abc");
    }
}
