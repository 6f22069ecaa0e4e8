//! Turning raw text input into numbers.
//!
//! Input from a form or a command line is never rejected: anything that
//! does not start with a number counts as 0, and a leading number followed
//! by junk (`"40%"`) keeps the number.

/// Parses the leading number of `raw`, or returns 0.
pub fn parse_or_zero(raw: &str) -> f64 {
    let s = raw.trim();
    let prefix = &s[..numeric_prefix_len(s)];
    match prefix.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Like [`parse_or_zero`] but blank input means "no value".
pub fn parse_optional(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(parse_or_zero(raw))
    }
}

/// Largest volume kept, in either unit.
pub const MAX_VOLUME: f64 = 1_000_000_000.0;

/// Volumes cannot be negative, and stay small enough that totals remain finite.
pub fn clamp_volume(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_VOLUME)
    } else {
        0.0
    }
}

/// ABV is a percentage.
pub fn clamp_abv(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

// Length in bytes of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
