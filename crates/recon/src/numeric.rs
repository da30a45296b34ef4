//! Lenient numeric coercion for spreadsheet-exported cells.
//!
//! Exports carry blanks, `#N/A`-style error markers and stray text in numeric
//! columns. None of that is fatal: every such value counts as zero.

/// Coerce a cell to a number.
///
/// Trims whitespace. Blank values, values starting with `#`, unparseable
/// text and non-finite results all become `0.0`.
pub fn coerce_number(value: &str) -> f64 {
    let s = value.trim();
    if s.is_empty() || s.starts_with('#') {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Coerce a cell to an integer, truncating toward zero.
pub fn coerce_int(value: &str) -> i64 {
    truncate(coerce_number(value))
}

/// Coerce a cell to a count. Negative values clamp to zero.
pub fn coerce_count(value: &str) -> u64 {
    clamp_count(coerce_number(value))
}

pub(crate) fn truncate(n: f64) -> i64 {
    n.trunc() as i64
}

pub(crate) fn clamp_count(n: f64) -> u64 {
    if n <= 0.0 {
        0
    } else {
        n.trunc() as u64
    }
}
