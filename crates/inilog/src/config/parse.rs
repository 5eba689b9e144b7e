//! Lenient conversions of stored strings into numbers and booleans.

/// Parse a decimal integer the way C's `atoi` does.
///
/// Leading ASCII whitespace and one optional sign are skipped, then digits
/// are consumed up to the first non-digit. Text without leading digits
/// yields `0`. Out-of-range values saturate.
///
/// # Examples
///
/// ```
/// use inilog::config::parse_int;
///
/// assert_eq!(parse_int("  42abc"), 42);
/// assert_eq!(parse_int("-7"), -7);
/// assert_eq!(parse_int("yes"), 0);
/// ```
#[must_use]
pub fn parse_int(text: &str) -> i64 {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0_i64, |acc, d| {
            let acc = acc.saturating_mul(10);
            if negative {
                acc.saturating_sub(i64::from(d))
            } else {
                acc.saturating_add(i64::from(d))
            }
        })
}

/// Parse a truth value.
///
/// A first character of `Y`, `T` or `1` (any case) is true. Anything else
/// is parsed with [`parse_int`] and is true when non-zero.
#[must_use]
pub fn parse_bool(text: &str) -> bool {
    match text.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('Y' | 'T' | '1') => true,
        _ => parse_int(text) != 0,
    }
}
