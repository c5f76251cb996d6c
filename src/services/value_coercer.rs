use std::sync::LazyLock;

use regex::Regex;

use crate::models::TypedValue;

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("valid integer pattern"));
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("valid decimal pattern"));

/// Turns a raw text field into the narrowest matching scalar.
///
/// Only plain integers and plain decimals count as numbers. Anything with an
/// exponent or a stray letter (`54401E143`) is kept as text so identifiers
/// survive intact.
pub fn coerce(raw: &str) -> TypedValue {
    let value = raw.trim();
    if value.is_empty() {
        return TypedValue::empty();
    }

    if INTEGER_PATTERN.is_match(value) {
        // Digits too wide for i64 fall through and end up as text.
        if let Ok(parsed) = value.parse::<i64>() {
            return TypedValue::Integer(parsed);
        }
    }

    if DECIMAL_PATTERN.is_match(value) {
        // Digit runs past f64 range parse to infinity, which has no JSON form.
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => return TypedValue::Double(parsed),
            _ => {}
        }
    }

    if value.eq_ignore_ascii_case("true") {
        return TypedValue::Boolean(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return TypedValue::Boolean(false);
    }

    TypedValue::String(value.to_string())
}
