//! Dynamic typing of delimited-text cells.

use roster_model::RawValue;

/// Largest integer that survives a round trip through `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts a text cell into a typed value.
///
/// - empty text is `Empty`
/// - `true`/`false` (any case) are booleans
/// - plain decimal numbers within the safe-integer range are numbers
/// - everything else stays text, untrimmed
pub fn infer_value(field: &str) -> RawValue {
    if field.is_empty() {
        return RawValue::Empty;
    }
    if field.eq_ignore_ascii_case("true") {
        return RawValue::Bool(true);
    }
    if field.eq_ignore_ascii_case("false") {
        return RawValue::Bool(false);
    }
    if looks_numeric(field)
        && let Ok(number) = field.trim().parse::<f64>()
        && number.abs() <= MAX_SAFE_INTEGER
    {
        return RawValue::Number(number);
    }
    RawValue::Text(field.to_string())
}

/// Matches `-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?` with optional
/// surrounding whitespace.
fn looks_numeric(field: &str) -> bool {
    let bytes = field.trim().as_bytes();
    let mut pos = 0;

    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let frac_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        frac_digits = pos - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}
