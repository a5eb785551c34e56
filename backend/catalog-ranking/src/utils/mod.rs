// Parsing helpers for raw catalog text

use std::num::IntErrorKind;

/// Parse the integer at the start of `raw`, ignoring anything after it.
/// `"1200 members"` -> 1200, `"abc"` -> None. Out-of-range numbers saturate
/// at `i64::MAX` / `i64::MIN`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }

    match trimmed[..digits_start + digits_len].parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Leading integer, or 0 for absent or non-numeric text.
pub fn int_or_zero(raw: Option<&str>) -> i64 {
    raw.and_then(parse_leading_int).unwrap_or(0)
}

/// A year token is exactly four ASCII digits.
pub fn parse_year(token: &str) -> Option<i64> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("1200"), Some(1200));
        assert_eq!(parse_leading_int("  42 stars"), Some(42));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("12.7"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_parse_leading_int_saturates() {
        assert_eq!(parse_leading_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_leading_int("99999999999999999999 members"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(int_or_zero(Some("123456789012345678901234567890")), i64::MAX);
    }

    #[test]
    fn test_int_or_zero() {
        assert_eq!(int_or_zero(Some("15")), 15);
        assert_eq!(int_or_zero(Some("n/a")), 0);
        assert_eq!(int_or_zero(None), 0);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1991"), Some(1991));
        assert_eq!(parse_year("199"), None);
        assert_eq!(parse_year("19911"), None);
        assert_eq!(parse_year("19a1"), None);
    }
}
